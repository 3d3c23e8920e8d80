//! The page-facing half of the IPC channel.
//!
//! Messages flow one way: page code calls `window.weld(message)`, which
//! stamps the widget name and forwards the JSON through
//! `window.ipc.postMessage`, landing in the webview's IPC handler.
//!
//! When a runtime module is given and the widget masks input or syncs its
//! size, the script also imports the module once the document is parsed and
//! calls its `weldStart()` export.

use weld_common::PageOptions;

/// Initialization script injected into every widget page before its own
/// scripts run.
pub fn init_script(options: &PageOptions, runtime: Option<&str>) -> String {
    let options_json = serde_json::to_string(options).unwrap_or_else(|_| "{}".to_string());
    let name_json =
        serde_json::to_string(&options.name).unwrap_or_else(|_| "\"\"".to_string());
    let bootstrap = match runtime {
        Some(module) if options.input_mask || options.sync_dimension => {
            runtime_bootstrap(module)
        }
        _ => String::new(),
    };
    format!(
        r#"
(function() {{
    window.weldOptions = {options_json};
    var name = {name_json};
    window.weld = function(message) {{
        window.ipc.postMessage(JSON.stringify(Object.assign({{}}, message, {{ name: name }})));
    }};
{bootstrap}}})();
"#
    )
}

/// Imports a wasm-bindgen `--target web` module, runs its default init and
/// then `weldStart()`, which reads `window.weldOptions`.
fn runtime_bootstrap(module: &str) -> String {
    let module_json = serde_json::to_string(module).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"    var start = function() {{
        var url = new URL({module_json}, document.baseURI).href;
        import(url)
            .then(function(runtime) {{
                return runtime.default().then(function() {{ runtime.weldStart(); }});
            }})
            .catch(function(err) {{ console.error("weld: page runtime failed", err); }});
    }};
    if (document.readyState === "loading") {{
        document.addEventListener("DOMContentLoaded", start);
    }} else {{
        start();
    }}
"#
    )
}
