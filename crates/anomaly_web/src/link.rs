//! Import linking for fetched modules.
//!
//! A wasm-bindgen build imports helper functions from its JS glue (module
//! `wbg`). Only the externref table setup is needed by a pure numeric export;
//! every other function import is bound to a stub that throws when called, so
//! the module still links and only fails if it actually reaches for the glue.

/// Export run once after instantiation when present.
pub const START_EXPORT: &str = "__wbindgen_start";

/// Glue import that seeds the externref table.
pub const EXTERNREF_TABLE_INIT: &str = "__wbindgen_init_externref_table";

/// One entry of `WebAssembly.Module.imports(module)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    pub module: String,
    pub name: String,
    pub kind: String,
}

impl ImportDescriptor {
    pub fn new(module: &str, name: &str, kind: &str) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStub {
    /// Grow the exported externref table and seed its reserved slots.
    ExternrefTableInit,
    /// Throw `unsupported import module.name` when called.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub module: String,
    pub name: String,
    pub stub: ImportStub,
}

/// Decide how to satisfy every import. Non-function imports cannot be
/// provided by the page and make the module unlinkable.
pub fn plan_imports(descriptors: &[ImportDescriptor]) -> Result<Vec<ImportBinding>, String> {
    descriptors
        .iter()
        .map(|d| {
            if d.kind != "function" {
                return Err(format!(
                    "module imports {} {}.{}; only function imports can be provided",
                    d.kind, d.module, d.name
                ));
            }
            let stub = if d.name == EXTERNREF_TABLE_INIT {
                ImportStub::ExternrefTableInit
            } else {
                ImportStub::Unsupported
            };
            Ok(ImportBinding {
                module: d.module.clone(),
                name: d.name.clone(),
                stub,
            })
        })
        .collect()
}

/// Distinct import namespaces in first-seen order.
pub fn import_namespaces(bindings: &[ImportBinding]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for b in bindings {
        if !out.contains(&b.module.as_str()) {
            out.push(&b.module);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_without_imports_needs_nothing() {
        assert_eq!(plan_imports(&[]), Ok(Vec::new()));
    }

    #[test]
    fn bindgen_externref_import_is_linked() {
        let plan = plan_imports(&[ImportDescriptor::new(
            "wbg",
            EXTERNREF_TABLE_INIT,
            "function",
        )])
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].module, "wbg");
        assert_eq!(plan[0].stub, ImportStub::ExternrefTableInit);
    }

    #[test]
    fn other_glue_functions_get_throwing_stubs() {
        let plan = plan_imports(&[
            ImportDescriptor::new("wbg", "__wbindgen_throw", "function"),
            ImportDescriptor::new("wbg", EXTERNREF_TABLE_INIT, "function"),
            ImportDescriptor::new("env", "log", "function"),
        ])
        .unwrap();
        let stubs: Vec<ImportStub> = plan.iter().map(|b| b.stub).collect();
        assert_eq!(
            stubs,
            vec![
                ImportStub::Unsupported,
                ImportStub::ExternrefTableInit,
                ImportStub::Unsupported
            ]
        );
        assert_eq!(import_namespaces(&plan), vec!["wbg", "env"]);
    }

    #[test]
    fn memory_import_is_unlinkable() {
        let err = plan_imports(&[ImportDescriptor::new("env", "memory", "memory")]).unwrap_err();
        assert!(err.contains("memory env.memory"));
    }
}
