//! Reflective class descriptors.
//!
//! A [`Class`] is the runtime description of a dynamically declared type:
//! its name, ordered bases, and ordered members. Once wrapped in an `Arc` a
//! class is immutable, so it can be shared as a base or read from any thread.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ContractError, Param, Signature};

/// Callable body attached to a method. Receives positional arguments only.
pub type Handler = Arc<dyn Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync>;

/// How a method binds its receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// First parameter is the instance receiver.
    #[default]
    Instance,
    /// First parameter is the class receiver.
    Class,
    /// No receiver.
    Static,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Instance => "instance",
            MethodKind::Class => "class",
            MethodKind::Static => "static",
        }
    }

    /// Whether the first declared parameter is an implicit receiver.
    pub fn has_receiver(&self) -> bool {
        !matches!(self, MethodKind::Static)
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method declared on a class, with its marker flags.
#[derive(Clone)]
pub struct Method {
    pub name: String,
    pub kind: MethodKind,
    /// `None` for natively implemented callables whose parameters cannot be read.
    pub params: Option<Vec<Param>>,
    pub doc: Option<String>,
    pub required: bool,
    pub required_classmethod: bool,
    pub is_final: bool,
    handler: Option<Handler>,
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("doc", &self.doc)
            .field("required", &self.required)
            .field("required_classmethod", &self.required_classmethod)
            .field("is_final", &self.is_final)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl Method {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Instance,
            params: Some(params),
            doc: None,
            required: false,
            required_classmethod: false,
            is_final: false,
            handler: None,
        }
    }

    /// A callable whose parameter list is not available for introspection.
    pub fn native(name: impl Into<String>) -> Self {
        Self {
            params: None,
            ..Self::new(name, Vec::new())
        }
    }

    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Run the attached body. Methods without a body return `null`.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, ContractError> {
        match &self.handler {
            Some(handler) => handler(args),
            None => Ok(Value::Null),
        }
    }
}

/// A class attribute.
#[derive(Debug, Clone)]
pub enum Member {
    Method(Method),
    /// A non-callable attribute.
    Data { name: String, value: Value },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Data { name, .. } => name,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Member::Method(m) => Some(m),
            Member::Data { .. } => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Method(_))
    }
}

/// A method an interface demands, with the shape captured when it was defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredMethod {
    pub signature: Signature,
    pub doc: Option<String>,
    /// Must be provided as a class method.
    #[serde(default)]
    pub classmethod: bool,
}

/// Required-method table attached to an interface class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    required: BTreeMap<String, RequiredMethod>,
}

impl InterfaceDefinition {
    pub fn new(required: BTreeMap<String, RequiredMethod>) -> Self {
        Self { required }
    }

    pub fn get(&self, name: &str) -> Option<&RequiredMethod> {
        self.required.get(name)
    }

    /// Required methods in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequiredMethod)> {
        self.required.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.required.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    bases: Vec<Arc<Class>>,
    members: Vec<Member>,
    /// Linearized ancestors, most-derived first; excludes the class itself.
    ancestors: Vec<Arc<Class>>,
    interface: Option<InterfaceDefinition>,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<Class>] {
        &self.bases
    }

    /// Members declared directly on this class, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Methods declared directly on this class.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(Member::as_method)
    }

    pub fn own_member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// The class followed by its linearized ancestors (C3 order).
    pub fn resolution_order(&self) -> impl DoubleEndedIterator<Item = &Class> {
        std::iter::once(self).chain(self.ancestors.iter().map(|a| &**a))
    }

    /// Ordinary attribute lookup: the first class in resolution order that
    /// declares `name`, together with the member it declares.
    pub fn lookup(&self, name: &str) -> Option<(&Class, &Member)> {
        self.resolution_order()
            .find_map(|cls| cls.own_member(name).map(|member| (cls, member)))
    }

    /// Value of a data attribute, resolved like `lookup`. A method shadowing
    /// the name hides any data further along the resolution order.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        match self.lookup(name)? {
            (_, Member::Data { value, .. }) => Some(value),
            (_, Member::Method(_)) => None,
        }
    }

    /// Whether `other` (by identity) appears in this class's resolution order.
    pub fn inherits_from(&self, other: &Class) -> bool {
        self.resolution_order().any(|cls| std::ptr::eq(cls, other))
    }

    pub fn interface(&self) -> Option<&InterfaceDefinition> {
        self.interface.as_ref()
    }

    pub fn is_interface(&self) -> bool {
        self.interface.is_some()
    }

    /// Attach an interface definition. Consumes the class, so a class that is
    /// already shared can never have its definition replaced.
    pub fn with_interface(mut self, definition: InterfaceDefinition) -> Self {
        self.interface = Some(definition);
        self
    }

    /// Resolve `method` and run it. Calling an unimplemented required stub
    /// fails the same way a missing implementation does.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, ContractError> {
        let no_such_method = || ContractError::NoSuchMethod {
            class: self.name.clone(),
            method: method.to_string(),
        };
        let (owner, member) = self.lookup(method).ok_or_else(no_such_method)?;
        let resolved = member.as_method().ok_or_else(no_such_method)?;
        if resolved.required {
            return Err(ContractError::MissingRequiredAttribute {
                class: self.name.clone(),
                interface: owner.name.clone(),
                method: method.to_string(),
                doc: resolved.doc.clone(),
            });
        }
        resolved.invoke(args)
    }
}

/// Collects bases and members before the resolution order is computed.
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    bases: Vec<Arc<Class>>,
    members: Vec<Member>,
}

impl ClassBuilder {
    pub fn base(mut self, base: &Arc<Class>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    pub fn bases(mut self, bases: impl IntoIterator<Item = Arc<Class>>) -> Self {
        self.bases.extend(bases);
        self
    }

    /// Declare a method. A later declaration of the same name replaces the
    /// earlier one, as a redefinition in a class body would.
    pub fn method(mut self, method: Method) -> Self {
        self.members.retain(|m| m.name() != method.name);
        self.members.push(Member::Method(method));
        self
    }

    pub fn data(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        self.members.retain(|m| m.name() != name);
        self.members.push(Member::Data { name, value });
        self
    }

    pub fn build(self) -> Result<Class, ContractError> {
        let ancestors = linearize(&self.name, &self.bases)?;
        Ok(Class {
            name: self.name,
            bases: self.bases,
            members: self.members,
            ancestors,
            interface: None,
        })
    }
}

/// C3 linearization of `bases`, excluding the class being built.
fn linearize(name: &str, bases: &[Arc<Class>]) -> Result<Vec<Arc<Class>>, ContractError> {
    let mut sequences: Vec<VecDeque<Arc<Class>>> = bases
        .iter()
        .map(|base| {
            std::iter::once(Arc::clone(base))
                .chain(base.ancestors.iter().cloned())
                .collect()
        })
        .collect();
    sequences.push(bases.iter().cloned().collect());

    let mut order = Vec::new();
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(order);
        }

        // A head is eligible when it appears in no sequence's tail.
        let next = sequences
            .iter()
            .map(|seq| &seq[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|seq| seq.iter().skip(1).any(|c| Arc::ptr_eq(c, head)))
            })
            .cloned()
            .ok_or_else(|| ContractError::InconsistentHierarchy {
                class: name.to_string(),
            })?;

        for seq in &mut sequences {
            if Arc::ptr_eq(&seq[0], &next) {
                seq.pop_front();
            }
        }
        order.push(next);
    }
}
