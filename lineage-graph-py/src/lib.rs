//! Python bindings for the lineage-graph Rust library.
//!
//! Training callbacks hand over a serialized dataset description as a Python
//! dict; these bindings canonicalize it, encode it and return the lineage
//! graph in its schema shape.

use lineage_graph::canonical::{canonical_float, FnCanonicalizer};
use lineage_graph::encoder::{DatasetGraphEncoder, ROOT_KEY};
use lineage_graph::errors::{LineageError, UnsupportedValueTypeError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyLong, PyTuple};

/// Encodes a dataset description dict into a lineage graph dict.
#[pyfunction]
fn package_dataset_graph(py: Python<'_>, description: &Bound<'_, PyDict>) -> PyResult<PyObject> {
    let canonicalizer = FnCanonicalizer::<Bound<'_, PyDict>, _>::new(|dict| {
        py_to_json(ROOT_KEY, dict.as_any()).map_err(|err| LineageError::Serialization(err.to_string()))
    });

    let graph = DatasetGraphEncoder::new()
        .encode_with(&canonicalizer, description)
        .map_err(to_py_err)?;
    let value = serde_json::to_value(&graph).map_err(|err| to_py_err(err.into()))?;

    json_to_py(py, &value)
}

/// Encodes a JSON dataset description into lineage graph JSON.
#[pyfunction]
fn package_dataset_graph_json(text: &str) -> PyResult<String> {
    DatasetGraphEncoder::new()
        .encode_json(text)
        .and_then(|graph| graph.to_json())
        .map_err(to_py_err)
}

fn to_py_err(err: LineageError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// Helper functions

/// Converts a Python value found under `key` into its canonical JSON form.
///
/// List and tuple elements report the key of the list holding them.
fn py_to_json(key: &str, obj: &Bound<'_, PyAny>) -> PyResult<serde_json::Value> {
    if obj.is_none() {
        return Ok(serde_json::Value::Null);
    }

    // bool is a subclass of int in Python, so it must be checked first
    if let Ok(b) = obj.extract::<bool>() {
        return Ok(serde_json::Value::Bool(b));
    }

    // ints never fall through to the float branch
    if obj.downcast::<PyLong>().is_ok() {
        return obj
            .extract::<i64>()
            .map(|i| serde_json::Value::Number(i.into()))
            .map_err(|_| unsupported(key, "integer out of range"));
    }

    if let Ok(i) = obj.extract::<i64>() {
        return Ok(serde_json::Value::Number(i.into()));
    }

    if let Ok(f) = obj.extract::<f64>() {
        return canonical_float(key, f).map_err(|err| to_py_err(err.into()));
    }

    if let Ok(s) = obj.extract::<String>() {
        return Ok(serde_json::Value::String(s));
    }

    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(|item| py_to_json(key, &item)).collect();
    }

    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return tuple.iter().map(|item| py_to_json(key, &item)).collect();
    }

    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = serde_json::Map::new();
        for (item_key, value) in dict.iter() {
            let key_str: String = item_key.str()?.to_string();
            let converted = py_to_json(&key_str, &value)?;
            map.insert(key_str, converted);
        }
        return Ok(serde_json::Value::Object(map));
    }

    // Fallback: convert to string representation
    Ok(serde_json::Value::String(obj.str()?.to_string()))
}

fn unsupported(key: &str, found: &str) -> PyErr {
    to_py_err(UnsupportedValueTypeError::new(key, found).into())
}

fn json_to_py(py: Python<'_>, value: &serde_json::Value) -> PyResult<PyObject> {
    let obj = match value {
        serde_json::Value::Null => py.None(),
        serde_json::Value::Bool(b) => b.into_py(py),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_py(py)
            } else if let Some(f) = n.as_f64() {
                f.into_py(py)
            } else {
                py.None()
            }
        }
        serde_json::Value::String(s) => s.into_py(py),
        serde_json::Value::Array(arr) => {
            let items = arr
                .iter()
                .map(|v| json_to_py(py, v))
                .collect::<PyResult<Vec<_>>>()?;
            PyList::new_bound(py, items).into_py(py)
        }
        serde_json::Value::Object(map) => {
            let dict = PyDict::new_bound(py);
            for (k, v) in map {
                dict.set_item(k, json_to_py(py, v)?)?;
            }
            dict.into_py(py)
        }
    };
    Ok(obj)
}

/// The lineage_graph Python module.
#[pymodule]
fn lineage_graph_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(package_dataset_graph, m)?)?;
    m.add_function(wrap_pyfunction!(package_dataset_graph_json, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
