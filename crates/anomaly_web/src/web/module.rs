use std::cell::RefCell;
use std::rc::Rc;

use anomaly_demo::config::ModuleSource;
use anomaly_demo::error::ModuleFault;
use anomaly_demo::module::ComputeModule;
use js_sys::{Array, Function, Object, Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::link::{
    import_namespaces, plan_imports, ImportBinding, ImportDescriptor, ImportStub, START_EXPORT,
};

type SharedExports = Rc<RefCell<Option<Object>>>;

/// A compiled module fetched over HTTP and instantiated in the page.
///
/// Clones share the resolved export, so one clone can be initialized inside a
/// spawned task while another serves click handlers.
#[derive(Clone)]
pub(super) struct WasmModule {
    source: ModuleSource,
    export: Rc<RefCell<Option<Function>>>,
}

impl WasmModule {
    pub(super) fn new(source: ModuleSource) -> Self {
        Self {
            source,
            export: Rc::new(RefCell::new(None)),
        }
    }

    async fn fetch_bytes(&self) -> Result<Vec<u8>, ModuleFault> {
        let window = web_sys::window().ok_or_else(|| ModuleFault::new("no window"))?;
        let resp = JsFuture::from(window.fetch_with_str(&self.source.url))
            .await
            .map_err(|e| js_fault("fetch", &e))?
            .dyn_into::<web_sys::Response>()
            .map_err(|_| ModuleFault::new("fetch: expected Response"))?;

        if !resp.ok() {
            return Err(ModuleFault::new(format!(
                "fetch {}: HTTP {}",
                self.source.url,
                resp.status()
            )));
        }

        let promise = resp
            .array_buffer()
            .map_err(|e| js_fault("array_buffer", &e))?;
        let buf = JsFuture::from(promise)
            .await
            .map_err(|e| js_fault("array_buffer", &e))?;
        Ok(Uint8Array::new(&buf).to_vec())
    }
}

impl ComputeModule for WasmModule {
    async fn init(&self) -> Result<(), ModuleFault> {
        let bytes = self.fetch_bytes().await?;

        let compiled = JsFuture::from(WebAssembly::compile(&Uint8Array::from(bytes.as_slice())))
            .await
            .map_err(|e| js_fault("compile", &e))?
            .dyn_into::<WebAssembly::Module>()
            .map_err(|_| ModuleFault::new("compile: expected Module"))?;

        let bindings = plan_imports(&import_descriptors(&compiled)?).map_err(ModuleFault::new)?;
        let exports_cell = Rc::new(RefCell::new(None));
        let imports = build_imports(&bindings, &exports_cell).map_err(|e| js_fault("imports", &e))?;

        let instance = JsFuture::from(WebAssembly::instantiate_module(&compiled, &imports))
            .await
            .map_err(|e| js_fault("instantiate", &e))?
            .dyn_into::<WebAssembly::Instance>()
            .map_err(|_| ModuleFault::new("instantiate: expected Instance"))?;
        let exports = instance.exports();
        *exports_cell.borrow_mut() = Some(exports.clone());

        let start = Reflect::get(&exports, &JsValue::from_str(START_EXPORT))
            .map_err(|e| js_fault("exports", &e))?;
        if let Some(start) = start.dyn_ref::<Function>() {
            start
                .call0(&JsValue::UNDEFINED)
                .map_err(|e| js_fault("start", &e))?;
        }

        let export = Reflect::get(&exports, &JsValue::from_str(&self.source.export))
            .map_err(|e| js_fault("exports", &e))?
            .dyn_into::<Function>()
            .map_err(|_| {
                ModuleFault::new(format!(
                    "module has no function export {:?}",
                    self.source.export
                ))
            })?;

        *self.export.borrow_mut() = Some(export);
        Ok(())
    }

    fn detect(&self, value: f64) -> Result<bool, ModuleFault> {
        let export = self.export.borrow();
        let f = export
            .as_ref()
            .ok_or_else(|| ModuleFault::new("module used before initialization"))?;

        let out = f
            .call1(&JsValue::UNDEFINED, &JsValue::from_f64(value))
            .map_err(|e| js_fault("detect", &e))?;

        // Raw (non-bindgen) exports hand booleans back as i32.
        if let Some(b) = out.as_bool() {
            return Ok(b);
        }
        out.as_f64()
            .map(|n| n != 0.0)
            .ok_or_else(|| ModuleFault::new("detect: export returned a non-numeric value"))
    }
}

fn js_fault(stage: &str, err: &JsValue) -> ModuleFault {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    ModuleFault::new(format!("{stage}: {detail}"))
}

fn import_descriptors(module: &WebAssembly::Module) -> Result<Vec<ImportDescriptor>, ModuleFault> {
    let field = |entry: &JsValue, key: &str| -> Result<String, ModuleFault> {
        Reflect::get(entry, &JsValue::from_str(key))
            .map_err(|e| js_fault("imports", &e))?
            .as_string()
            .ok_or_else(|| ModuleFault::new(format!("imports: missing {key}")))
    };
    WebAssembly::Module::imports(module)
        .iter()
        .map(|entry| {
            Ok(ImportDescriptor {
                module: field(&entry, "module")?,
                name: field(&entry, "name")?,
                kind: field(&entry, "kind")?,
            })
        })
        .collect()
}

fn build_imports(bindings: &[ImportBinding], exports: &SharedExports) -> Result<Object, JsValue> {
    let imports = Object::new();
    for ns in import_namespaces(bindings) {
        Reflect::set(&imports, &JsValue::from_str(ns), &Object::new())?;
    }

    for b in bindings {
        let ns = Reflect::get(&imports, &JsValue::from_str(&b.module))?;
        let stub = match b.stub {
            ImportStub::ExternrefTableInit => {
                let exports = Rc::clone(exports);
                Closure::wrap(Box::new(move || init_externref_table(&exports))
                    as Box<dyn FnMut() -> Result<(), JsValue>>)
            }
            ImportStub::Unsupported => {
                let label = format!("unsupported import {}.{}", b.module, b.name);
                Closure::wrap(Box::new(move || Err(JsValue::from_str(&label)))
                    as Box<dyn FnMut() -> Result<(), JsValue>>)
            }
        };
        Reflect::set(&ns, &JsValue::from_str(&b.name), &stub.into_js_value())?;
    }
    Ok(imports)
}

/// Same seeding the bindgen glue performs: reserve four slots and store
/// `undefined`, `null`, `true`, `false` in them.
fn init_externref_table(exports: &SharedExports) -> Result<(), JsValue> {
    let exports = exports.borrow();
    let exports = exports
        .as_ref()
        .ok_or_else(|| JsValue::from_str("externref table used before instantiation"))?;

    let table = Object::entries(exports)
        .iter()
        .filter_map(|entry| entry.dyn_into::<Array>().ok())
        .find(|pair| {
            pair.get(0)
                .as_string()
                .is_some_and(|k| k.starts_with("__wbindgen_export"))
                && pair.get(1).is_instance_of::<WebAssembly::Table>()
        })
        .map(|pair| pair.get(1).unchecked_into::<WebAssembly::Table>())
        .ok_or_else(|| JsValue::from_str("module exports no externref table"))?;

    let offset = table.grow(4)?;
    let set = Reflect::get(&table, &JsValue::from_str("set"))?.dyn_into::<Function>()?;
    let seed = [
        (0, JsValue::UNDEFINED),
        (offset, JsValue::UNDEFINED),
        (offset + 1, JsValue::NULL),
        (offset + 2, JsValue::TRUE),
        (offset + 3, JsValue::FALSE),
    ];
    for (index, value) in seed {
        set.call2(&table, &JsValue::from(index), &value)?;
    }
    Ok(())
}
