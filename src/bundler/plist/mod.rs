//! Property-list value model and XML serialization.
//!
//! The serializer renders the small subset of Apple's plist 1.0 format the
//! WebObjects runtime consumes: strings, booleans, arrays, and ordered
//! dictionaries. Keys are emitted in insertion order; string values are
//! inlined verbatim, without XML escaping.

mod info;

pub use info::build_info_plist;

/// A property-list value.
///
/// Dictionaries preserve insertion order, so the emitted document is
/// deterministic.
#[derive(Clone, Debug, PartialEq)]
pub enum PlistValue {
    String(String),
    Bool(bool),
    Array(Vec<PlistValue>),
    Dict(Vec<(String, PlistValue)>),
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Bool(value)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(value: Vec<PlistValue>) -> Self {
        PlistValue::Array(value)
    }
}

/// An order-preserving string-keyed dictionary under construction.
#[derive(Clone, Debug, Default)]
pub struct PlistDict {
    entries: Vec<(String, PlistValue)>,
}

impl PlistDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Keys are not deduplicated; callers insert each key
    /// once.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PlistValue>) {
        self.entries.push((key.into(), value.into()));
    }
}

impl From<PlistDict> for PlistValue {
    fn from(dict: PlistDict) -> Self {
        PlistValue::Dict(dict.entries)
    }
}

/// Renders `value` as a complete XML plist document: fixed header, the
/// value at indent level 1 (one tab per nesting level), closing tag.
pub fn serialize(value: &PlistValue) -> String {
    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<!DOCTYPE plist PUBLIC \"-//Apple Computer//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    );
    out.push_str("<plist version=\"1.0\">\n");

    append_entry(&mut out, 1, value);

    out.push_str("</plist>");
    out
}

fn append_entry(out: &mut String, indent: usize, value: &PlistValue) {
    indent_by(out, indent);

    match value {
        PlistValue::String(s) => {
            out.push_str("<string>");
            out.push_str(s);
            out.push_str("</string>\n");
        }
        PlistValue::Bool(true) => out.push_str("<true/>\n"),
        PlistValue::Bool(false) => out.push_str("<false/>\n"),
        PlistValue::Array(items) => {
            out.push_str("<array>\n");

            for item in items {
                append_entry(out, indent + 1, item);
            }

            indent_by(out, indent);
            out.push_str("</array>\n");
        }
        PlistValue::Dict(entries) => {
            out.push_str("<dict>\n");

            for (key, entry) in entries {
                indent_by(out, indent + 1);
                out.push_str("<key>");
                out.push_str(key);
                out.push_str("</key>\n");
                append_entry(out, indent + 1, entry);
            }

            indent_by(out, indent);
            out.push_str("</dict>\n");
        }
    }
}

fn indent_by(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_string_array_in_order() {
        let value = PlistValue::Array(vec!["alpha".into(), "beta".into(), "gamma".into()]);

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
            <!DOCTYPE plist PUBLIC \"-//Apple Computer//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
            <plist version=\"1.0\">\n\
            \t<array>\n\
            \t\t<string>alpha</string>\n\
            \t\t<string>beta</string>\n\
            \t\t<string>gamma</string>\n\
            \t</array>\n\
            </plist>";

        assert_eq!(serialize(&value), expected);
    }

    #[test]
    fn serializes_dict_in_insertion_order() {
        let mut dict = PlistDict::new();
        dict.insert("alpha", "beta");
        dict.insert("gamma", "delta");

        let serialized = serialize(&dict.into());

        let expected_body = "\t<dict>\n\
            \t\t<key>alpha</key>\n\
            \t\t<string>beta</string>\n\
            \t\t<key>gamma</key>\n\
            \t\t<string>delta</string>\n\
            \t</dict>\n";

        assert!(serialized.contains(expected_body));
    }

    #[test]
    fn dict_order_follows_insertion_not_key_sort() {
        let mut forward = PlistDict::new();
        forward.insert("a", "1");
        forward.insert("b", "2");

        let mut reverse = PlistDict::new();
        reverse.insert("b", "2");
        reverse.insert("a", "1");

        let forward = serialize(&forward.into());
        let reverse = serialize(&reverse.into());

        assert!(forward.find("<key>a</key>").unwrap() < forward.find("<key>b</key>").unwrap());
        assert!(reverse.find("<key>b</key>").unwrap() < reverse.find("<key>a</key>").unwrap());
    }

    #[test]
    fn serializes_booleans_as_self_closing_elements() {
        assert!(serialize(&PlistValue::Bool(true)).contains("\t<true/>\n"));
        assert!(serialize(&PlistValue::Bool(false)).contains("\t<false/>\n"));

        let serialized = serialize(&PlistValue::Bool(true));
        assert!(!serialized.contains("<true>"));
        assert!(!serialized.contains("<string>true</string>"));
    }

    #[test]
    fn serializes_nested_structures_with_deeper_indentation() {
        let mut inner = PlistDict::new();
        inner.insert("JVMVersion", "1.5+");

        let mut outer = PlistDict::new();
        outer.insert("Java", inner);

        let serialized = serialize(&outer.into());

        assert!(serialized.contains("\t\t<key>JVMVersion</key>\n"));
        assert!(serialized.contains("\t\t<string>1.5+</string>\n"));
    }
}
