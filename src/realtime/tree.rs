use serde_json::{Map, Value};

/// Local mirror of the subtree under a subscribed path, kept current from
/// `put`/`patch` events. `None` means nothing is stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mirror {
    root: Option<Value>,
}

impl Mirror {
    pub fn value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Value at `path` below the mirror root, if any.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut node = self.root.as_ref()?;
        for seg in path.split('/').filter(|s| !s.is_empty()) {
            node = match node {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if node.is_null() { None } else { Some(node) }
    }

    /// Replaces the value at `path` (relative to the subscription) with `data`.
    /// A `null` deletes; empty parents left behind are pruned.
    pub fn put(&mut self, path: &str, data: Value) {
        let segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segs.is_empty() {
            self.root = if data.is_null() { None } else { Some(data) };
            return;
        }
        let mut node = self.root.take().unwrap_or(Value::Null);
        put_at(&mut node, &segs, data);
        self.root = if is_empty(&node) { None } else { Some(node) };
    }

    /// Merges the children of `data` into the object at `path`.
    pub fn patch(&mut self, path: &str, data: Value) {
        let Value::Object(children) = data else {
            self.put(path, data);
            return;
        };
        let base = path.trim_end_matches('/');
        for (key, value) in children {
            self.put(&format!("{}/{}", base, key), value);
        }
    }
}

fn put_at(node: &mut Value, segs: &[&str], data: Value) {
    let Some((first, rest)) = segs.split_first() else {
        *node = data;
        return;
    };

    if let Value::Array(items) = node
        && let Ok(idx) = first.parse::<usize>()
        && idx < items.len()
    {
        put_at(&mut items[idx], rest, data);
        return;
    }

    if !node.is_object() {
        *node = Value::Object(into_map(std::mem::take(node)));
    }
    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        if data.is_null() {
            map.remove(*first);
        } else {
            map.insert(first.to_string(), data);
        }
        return;
    }

    let child = map.entry(first.to_string()).or_insert(Value::Null);
    put_at(child, rest, data);
    if is_empty(child) {
        map.remove(*first);
    }
}

/// Arrays become index-keyed objects once a write lands outside their bounds.
fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Map::new(),
    }
}

fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        _ => false,
    }
}
