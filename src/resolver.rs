//! # Symbol Resolver
//!
//! Three-tier lookup against the inherited symbol table (`spec.md` §4.3):
//! current-method locals, then modules, then globals. Each tier is a single
//! `HashMap` lookup (O(1)); on a hit, outer tiers are never consulted.
//!
//! There is no wildcard or dotted-path resolution: qualified names are
//! produced by the parser as distinct identifiers already present in one of
//! these maps.

use crate::symbol::{MethodSymbol, ModuleSymbol, Symbol, SymbolTable};

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    /// Name of the method currently being walked, if any. Non-`None` only
    /// during the walk of a function body (`spec.md` §3 invariant).
    current_method: Option<String>,
    pub modules: SymbolTable,
    pub globals: SymbolTable,
}

impl Resolver {
    pub fn new(globals: SymbolTable) -> Resolver {
        Resolver {
            current_method: None,
            modules: SymbolTable::default(),
            globals,
        }
    }

    pub fn with_modules(mut self, modules: SymbolTable) -> Resolver {
        self.modules = modules;
        self
    }

    pub fn current_method_name(&self) -> Option<&str> {
        self.current_method.as_deref()
    }

    /// Borrow the `Method` symbol named by `current_method`, if set and if it
    /// actually resolves to a method in globals. Panics on a dangling name --
    /// that would mean `enter_method` was called with a name absent from
    /// `globals`, which the driver never does.
    pub fn current_method(&self) -> Option<&MethodSymbol> {
        let name = self.current_method.as_ref()?;
        match self.globals.get(name) {
            Some(Symbol::Method(m)) => Some(m),
            Some(_) => unreachable!("current_method {name} does not name a Method symbol"),
            None => unreachable!("current_method {name} is not registered in globals"),
        }
    }

    /// Enter a function body: `current_method` becomes `Some(name)` for the
    /// duration of the body walk (`spec.md` §4.5 Function definition, step b).
    pub fn enter_method(&mut self, name: impl Into<String>) {
        self.current_method = Some(name.into());
    }

    /// Leave the function body (`spec.md` §4.5 Function definition, step d).
    pub fn exit_method(&mut self) {
        self.current_method = None;
    }

    /// Resolve `id` through the three tiers in order: current-method locals,
    /// modules, globals.
    pub fn resolve(&self, id: &str) -> Option<&Symbol> {
        if let Some(method) = self.current_method() {
            if let Some(sym) = method.locals.get(id) {
                return Some(sym);
            }
        }
        if let Some(sym) = self.modules.get(id) {
            return Some(sym);
        }
        self.globals.get(id)
    }

    /// Convenience used when a resolved module symbol's own symbol map needs
    /// checking directly (e.g. qualified access already flattened by the
    /// parser into a plain identifier present in `modules`).
    pub fn resolve_module(&self, id: &str) -> Option<&ModuleSymbol> {
        match self.modules.get(id) {
            Some(Symbol::Module(m)) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn method_with_local(name: &str, ty: Type) -> Symbol {
        let mut locals = SymbolTable::default();
        locals.insert(name.to_string(), Symbol::Expression(ty));
        Symbol::Method(MethodSymbol {
            params: vec![],
            return_type: Type::NoneType,
            locals,
        })
    }

    #[test]
    fn locals_beat_modules_beat_globals() {
        let mut globals = SymbolTable::default();
        globals.insert("x".to_string(), Symbol::Expression(Type::Integer));
        globals.insert("f".to_string(), method_with_local("x", Type::Boolean));

        let mut modules = SymbolTable::default();
        modules.insert("x".to_string(), Symbol::Expression(Type::String));

        let mut resolver = Resolver::new(globals).with_modules(modules);

        // global scope wins when no module/local shadows it
        assert_eq!(resolver.resolve("x"), Some(&Symbol::Expression(Type::Integer)));

        resolver.enter_method("f");
        // now the method-local `x` (Boolean) wins over both module and global
        assert_eq!(resolver.resolve("x"), Some(&Symbol::Expression(Type::Boolean)));

        resolver.exit_method();
        assert_eq!(resolver.resolve("x"), Some(&Symbol::Expression(Type::Integer)));
    }

    #[test]
    fn module_beats_global_when_no_local_shadows() {
        let mut globals = SymbolTable::default();
        globals.insert("y".to_string(), Symbol::Expression(Type::Integer));

        let mut modules = SymbolTable::default();
        modules.insert("y".to_string(), Symbol::Expression(Type::String));

        let resolver = Resolver::new(globals).with_modules(modules);
        assert_eq!(resolver.resolve("y"), Some(&Symbol::Expression(Type::String)));
    }

    #[test]
    fn unresolved_identifier_is_none() {
        let resolver = Resolver::new(SymbolTable::default());
        assert_eq!(resolver.resolve("nope"), None);
    }
}
