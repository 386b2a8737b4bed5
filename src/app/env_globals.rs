//! Runtime globals implied by legacy `env` entries.

use crate::app::models::GlobalAccess;
use std::collections::BTreeMap;

const ES_BUILTINS: &[&str] = &[
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "NaN",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
    "globalThis",
];

const SHARED_NODE_BROWSER: &[&str] = &[
    "AbortController",
    "AbortSignal",
    "Blob",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "atob",
    "btoa",
    "clearInterval",
    "clearTimeout",
    "console",
    "fetch",
    "queueMicrotask",
    "setInterval",
    "setTimeout",
    "structuredClone",
];

const BROWSER: &[&str] = &[
    "CustomEvent",
    "Event",
    "EventTarget",
    "FormData",
    "Headers",
    "HTMLElement",
    "Image",
    "MutationObserver",
    "Node",
    "Request",
    "Response",
    "WebSocket",
    "Worker",
    "XMLHttpRequest",
    "alert",
    "cancelAnimationFrame",
    "confirm",
    "document",
    "history",
    "localStorage",
    "location",
    "navigator",
    "requestAnimationFrame",
    "self",
    "sessionStorage",
    "window",
];

const NODE: &[&str] = &[
    "Buffer",
    "__dirname",
    "__filename",
    "clearImmediate",
    "exports",
    "global",
    "module",
    "process",
    "require",
    "setImmediate",
];

const COMMONJS: &[&str] = &["exports", "global", "module", "require"];

const WORKER: &[&str] = &[
    "close",
    "importScripts",
    "onmessage",
    "postMessage",
    "self",
];

const SERVICE_WORKER: &[&str] = &["caches", "clients", "registration", "self", "skipWaiting"];

const JEST: &[&str] = &[
    "afterAll",
    "afterEach",
    "beforeAll",
    "beforeEach",
    "describe",
    "expect",
    "fit",
    "it",
    "jest",
    "pit",
    "require",
    "test",
    "xdescribe",
    "xit",
    "xtest",
];

const MOCHA: &[&str] = &[
    "after",
    "afterEach",
    "before",
    "beforeEach",
    "context",
    "describe",
    "it",
    "mocha",
    "run",
    "setup",
    "specify",
    "suite",
    "suiteSetup",
    "suiteTeardown",
    "teardown",
    "test",
    "xcontext",
    "xdescribe",
    "xit",
    "xspecify",
];

const JASMINE: &[&str] = &[
    "afterAll",
    "afterEach",
    "beforeAll",
    "beforeEach",
    "describe",
    "expect",
    "expectAsync",
    "fail",
    "fdescribe",
    "fit",
    "it",
    "jasmine",
    "pending",
    "spyOn",
    "spyOnProperty",
    "xdescribe",
    "xit",
];

const QUNIT: &[&str] = &["QUnit"];

const JQUERY: &[&str] = &["$", "jQuery"];

/// Global names for a known environment, or `None` if the name is unknown.
pub fn globals_for(env: &str) -> Option<&'static [&'static str]> {
    let names = match env {
        "browser" => BROWSER,
        "node" => NODE,
        "commonjs" => COMMONJS,
        "shared-node-browser" => SHARED_NODE_BROWSER,
        "worker" => WORKER,
        "serviceworker" => SERVICE_WORKER,
        "jest" => JEST,
        "mocha" => MOCHA,
        "jasmine" => JASMINE,
        "qunit" => QUNIT,
        "jquery" => JQUERY,
        "es6" | "es2015" | "es2016" | "es2017" | "es2018" | "es2019" | "es2020" | "es2021"
        | "es2022" => ES_BUILTINS,
        _ => return None,
    };
    Some(names)
}

/// Expands enabled environments into a sorted global table. Unknown
/// environments are skipped with a warning.
pub fn expand<'a>(envs: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, GlobalAccess> {
    let mut globals = BTreeMap::new();
    for env in envs {
        match globals_for(env) {
            Some(names) => {
                log::debug!("Expanding env {:?} into {} globals", env, names.len());
                for name in names {
                    globals.insert((*name).to_string(), GlobalAccess::Readonly);
                }
            }
            None => log::warn!("Unknown legacy env {:?}; no globals added for it", env),
        }
    }
    globals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jest_expands_to_every_jest_global() {
        let globals = expand(["jest"]);
        for name in JEST {
            assert_eq!(globals.get(*name), Some(&GlobalAccess::Readonly));
        }
        assert_eq!(globals.len(), JEST.len());
    }

    #[test]
    fn test_unknown_env_contributes_nothing() {
        assert!(expand(["made-up"]).is_empty());
        assert!(globals_for("made-up").is_none());
    }

    #[test]
    fn test_overlapping_envs_are_merged_and_sorted() {
        let globals = expand(["mocha", "jest"]);
        let names: Vec<&String> = globals.keys().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(globals.contains_key("jest"));
        assert!(globals.contains_key("suite"));
        assert_eq!(names.iter().filter(|n| n.as_str() == "describe").count(), 1);
    }

    #[test]
    fn test_es_versions_share_builtins() {
        assert_eq!(globals_for("es2020"), globals_for("es6"));
    }
}
