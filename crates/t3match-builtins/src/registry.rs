use crate::functions;
use crate::{LogSink, RegistryError, RuntimeError, Signature};
use std::collections::HashMap;
use std::sync::LazyLock;
use t3match_value::Object;
use tracing::trace;

/// Native implementation of a builtin. Arguments arrive already checked
/// against the signature; `out` and `inout` arguments are updated in place.
/// `None` means the builtin returns nothing.
pub type BuiltinFn = fn(&mut Context<'_>, &mut [Object]) -> Result<Option<Object>, RuntimeError>;

/// Per-call environment handed to builtins.
pub struct Context<'a> {
    log: &'a LogSink,
}

impl<'a> Context<'a> {
    pub fn new(log: &'a LogSink) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &LogSink {
        self.log
    }
}

pub struct Builtin {
    signature: Signature,
    func: BuiltinFn,
}

impl Builtin {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn call(&self, ctx: &mut Context<'_>, args: &mut [Object]) -> Result<Option<Object>, RuntimeError> {
        self.signature.check(args)?;
        trace!(name = %self.signature.name, args = args.len(), "calling builtin");
        (self.func)(ctx, args)
    }
}

static STANDARD: LazyLock<Builtins> = LazyLock::new(|| {
    functions::register(Builtins::builder())
        .map(BuiltinsBuilder::build)
        .unwrap_or_else(|e| unreachable!("standard builtins are well-formed: {}", e))
});

/// An immutable table of builtins, looked up by name.
pub struct Builtins {
    table: HashMap<String, Builtin>,
}

impl Builtins {
    pub fn builder() -> BuiltinsBuilder {
        BuiltinsBuilder {
            table: HashMap::new(),
        }
    }

    /// The predefined functions, built on first use.
    pub fn standard() -> &'static Builtins {
        &STANDARD
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.table.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn call(
        &self,
        name: &str,
        ctx: &mut Context<'_>,
        args: &mut [Object],
    ) -> Result<Option<Object>, RuntimeError> {
        let builtin = self
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction(name.to_string()))?;
        builtin.call(ctx, args)
    }
}

pub struct BuiltinsBuilder {
    table: HashMap<String, Builtin>,
}

impl BuiltinsBuilder {
    pub fn add(mut self, signature: &str, func: BuiltinFn) -> Result<Self, RegistryError> {
        let signature = Signature::parse(signature)?;
        if self.table.contains_key(&signature.name) {
            return Err(RegistryError::AlreadyDefined(signature.name));
        }
        self.table
            .insert(signature.name.clone(), Builtin { signature, func });
        Ok(self)
    }

    pub fn build(self) -> Builtins {
        Builtins { table: self.table }
    }
}
