//! Recursive resolution of indirect references inside nested containers.

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Resolve an indirect reference one level, returning the referenced object.
///
/// Anything other than a reference (or a dangling reference) comes back
/// unchanged.
pub(crate) fn resolve_ref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Deeply resolve every indirect reference inside `obj`.
///
/// Dictionaries and arrays are rebuilt with resolved children; a stream has
/// its dictionary resolved in place and its payload left untouched. A
/// reference that re-enters the current resolution path (a cycle) or does
/// not resolve is left as-is.
pub fn resolve_references(doc: &Document, obj: &Object) -> Object {
    let mut path = Vec::new();
    resolve(doc, obj, &mut path)
}

fn resolve(doc: &Document, obj: &Object, path: &mut Vec<ObjectId>) -> Object {
    match obj {
        Object::Reference(id) => {
            if path.contains(id) {
                return Object::Reference(*id);
            }
            match doc.get_object(*id) {
                Ok(target) => {
                    path.push(*id);
                    let resolved = resolve(doc, target, path);
                    path.pop();
                    resolved
                }
                Err(_) => Object::Reference(*id),
            }
        }
        Object::Array(items) => {
            Object::Array(items.iter().map(|item| resolve(doc, item, path)).collect())
        }
        Object::Dictionary(dict) => Object::Dictionary(resolve_dict(doc, dict, path)),
        Object::Stream(stream) => {
            let mut out = stream.clone();
            out.dict = resolve_dict(doc, &stream.dict, path);
            Object::Stream(out)
        }
        other => other.clone(),
    }
}

fn resolve_dict(doc: &Document, dict: &Dictionary, path: &mut Vec<ObjectId>) -> Dictionary {
    let mut out = Dictionary::new();
    for (key, value) in dict.iter() {
        out.set(key.clone(), resolve(doc, value, path));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn scalars_pass_through() {
        let doc = Document::with_version("1.4");
        assert_eq!(
            resolve_references(&doc, &Object::Integer(7)),
            Object::Integer(7)
        );
        assert_eq!(resolve_references(&doc, &Object::Null), Object::Null);
    }

    #[test]
    fn reference_in_dictionary_is_resolved() {
        let mut doc = Document::with_version("1.4");
        let target = doc.add_object(Object::Integer(42));
        let dict = dictionary! { "Count" => target };

        let resolved = resolve_references(&doc, &Object::Dictionary(dict));
        let resolved = resolved.as_dict().unwrap();
        assert_eq!(resolved.get(b"Count").unwrap(), &Object::Integer(42));
    }

    #[test]
    fn nested_containers_are_resolved() {
        let mut doc = Document::with_version("1.4");
        let inner = doc.add_object(Object::string_literal("deep"));
        let arr = Object::Array(vec![
            Object::Integer(1),
            Object::Dictionary(dictionary! { "Value" => inner }),
        ]);

        let resolved = resolve_references(&doc, &arr);
        let Object::Array(items) = resolved else {
            panic!("expected array");
        };
        let dict = items[1].as_dict().unwrap();
        assert!(matches!(dict.get(b"Value").unwrap(), Object::String(..)));
    }

    #[test]
    fn stream_payload_is_untouched() {
        let mut doc = Document::with_version("1.4");
        let length = doc.add_object(Object::Integer(4));
        let stream = lopdf::Stream::new(dictionary! { "Length" => length }, b"abcd".to_vec());

        let resolved = resolve_references(&doc, &Object::Stream(stream));
        let resolved = resolved.as_stream().unwrap();
        assert_eq!(resolved.dict.get(b"Length").unwrap(), &Object::Integer(4));
        assert_eq!(resolved.content, b"abcd".to_vec());
    }

    #[test]
    fn dangling_reference_is_kept() {
        let doc = Document::with_version("1.4");
        let obj = Object::Reference((99, 0));
        assert_eq!(resolve_references(&doc, &obj), Object::Reference((99, 0)));
    }

    #[test]
    fn reference_cycle_terminates() {
        let mut doc = Document::with_version("1.4");
        let a_id = doc.new_object_id();
        let b_id = doc.add_object(Object::Dictionary(dictionary! { "Back" => a_id }));
        doc.objects.insert(
            a_id,
            Object::Dictionary(dictionary! { "Forward" => b_id }),
        );

        // Must terminate; the re-entrant edge stays a reference.
        let resolved = resolve_references(&doc, &Object::Reference(a_id));
        let outer = resolved.as_dict().unwrap();
        let inner = outer.get(b"Forward").unwrap().as_dict().unwrap();
        assert_eq!(inner.get(b"Back").unwrap(), &Object::Reference(a_id));
    }
}
