//! Method markers. Each returns the method with one flag set and its
//! behaviour otherwise untouched.

use pact_core::class::Method;

/// Mark a method as mandatory for implementers of the enclosing interface.
/// Has no observable effect until the class passes through `define`.
pub fn require(mut method: Method) -> Method {
    method.required = true;
    method
}

/// Like [`require`], but implementers must provide a class method.
pub fn require_classmethod(method: Method) -> Method {
    let mut method = require(method);
    method.required_classmethod = true;
    method
}

/// Mark a method as non-overridable by later classes in the lookup chain.
pub fn mark_final(mut method: Method) -> Method {
    method.is_final = true;
    method
}
