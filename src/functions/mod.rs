//! Builtin numeric functions and the table the evaluator dispatches through.

pub mod exponential;
pub mod rounding;
pub mod trigonometric;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type Transform = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A table entry: a fixed arity and the transform applied to exactly that
/// many evaluated arguments.
#[derive(Clone)]
pub struct Function {
    arity: usize,
    transform: Transform,
}

impl Function {
    pub fn new<F>(arity: usize, transform: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            arity,
            transform: Arc::new(transform),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Applies the transform, or returns `NaN` when `args.len()` differs from
    /// the arity. The evaluator reports that case as an error before calling.
    pub fn call(&self, args: &[f64]) -> f64 {
        if args.len() != self.arity {
            return f64::NAN;
        }
        (self.transform)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

static BUILTIN: Lazy<Arc<FunctionTable>> = Lazy::new(|| {
    let mut table = FunctionTable::new();
    register_functions(&mut table);
    Arc::new(table)
});

/// Name → [`Function`] mapping consulted by the evaluator.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The shared table of builtin functions, built on first use.
    pub fn builtin() -> Arc<FunctionTable> {
        Arc::clone(&BUILTIN)
    }

    /// Registers a function, replacing any entry with the same name.
    pub fn register_function(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), function);
    }

    /// Makes `alias` resolve to the entry currently registered as `target`.
    /// Returns `false` if `target` is unknown.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> bool {
        match self.functions.get(target).cloned() {
            Some(function) => {
                self.functions.insert(alias.to_string(), function);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

pub fn register_functions(table: &mut FunctionTable) {
    exponential::register(table);
    rounding::register(table);
    trigonometric::register(table);
}

/// Registers `function` as `name` and as the qualified `math.<Name>`.
pub(crate) fn register_with_math_alias(table: &mut FunctionTable, name: &str, function: Function) {
    table.register_function(name, function);

    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        let qualified = format!("math.{}{}", first.to_ascii_uppercase(), chars.as_str());
        table.register_alias(&qualified, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_call() {
        let mut table = FunctionTable::new();
        table.register_function("add", Function::new(2, |args| args[0] + args[1]));

        let add = table.get("add").unwrap();
        assert_eq!(add.arity(), 2);
        assert_eq!(add.call(&[2.0, 3.0]), 5.0);
        assert!(table.get("sub").is_none());
    }

    #[test]
    fn test_call_with_wrong_argument_count_is_nan() {
        let table = FunctionTable::builtin();
        let atan2 = table.get("atan2").unwrap();
        assert!(atan2.call(&[]).is_nan());
        assert!(atan2.call(&[1.0]).is_nan());
        assert!(atan2.call(&[1.0, 2.0, 3.0]).is_nan());
        assert!(!atan2.call(&[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_register_replaces_existing_entry() {
        let mut table = FunctionTable::new();
        table.register_function("f", Function::new(1, |args| args[0]));
        table.register_function("f", Function::new(2, |args| args[1]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("f").unwrap().arity(), 2);
    }

    #[test]
    fn test_alias_requires_target() {
        let mut table = FunctionTable::new();
        assert!(!table.register_alias("calc.Neg", "neg"));
        table.register_function("neg", Function::new(1, |args| -args[0]));
        assert!(table.register_alias("calc.Neg", "neg"));
        assert_eq!(table.get("calc.Neg").unwrap().call(&[4.0]), -4.0);
    }

    #[test]
    fn test_math_alias_is_capitalized() {
        let mut table = FunctionTable::new();
        register_with_math_alias(&mut table, "log10", Function::new(1, |args| args[0].log10()));
        assert_eq!(table.names(), vec!["log10", "math.Log10"]);
    }

    #[test]
    fn test_builtin_table_contents() {
        let table = FunctionTable::builtin();
        for (name, arity) in [
            ("exp", 1),
            ("log", 1),
            ("abs", 1),
            ("math.Exp", 1),
            ("math.Log", 1),
            ("math.Abs", 1),
            ("pow", 2),
            ("math.Pow", 2),
            ("atan2", 2),
            ("hypot", 2),
            ("min", 2),
            ("max", 2),
        ] {
            assert_eq!(table.get(name).map(Function::arity), Some(arity), "{}", name);
        }
        assert!(!table.contains("Exp"));
    }

    #[test]
    fn test_builtin_table_is_shared() {
        assert!(Arc::ptr_eq(&FunctionTable::builtin(), &FunctionTable::builtin()));
    }
}
