//! GraphML reader
//!
//! Supports typed `<key>` declarations with defaults, `<data>` on nodes,
//! edges and the graph element, and both `edgedefault` values. Undirected
//! edges become reciprocal directed pairs. Hyperedges, ports and nested
//! graphs are rejected.

use super::{FormatError, Parsed};
use crate::graph::{Graph, PropertyMap, PropertyValue};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyDomain {
    All,
    Graph,
    Node,
    Edge,
    Other,
}

impl KeyDomain {
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("all") {
            "all" => KeyDomain::All,
            "graph" => KeyDomain::Graph,
            "node" => KeyDomain::Node,
            "edge" => KeyDomain::Edge,
            _ => KeyDomain::Other,
        }
    }

    fn covers(self, owner: KeyDomain) -> bool {
        self == KeyDomain::All || self == owner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrType {
    Boolean,
    Integer,
    Float,
    String,
}

impl AttrType {
    fn parse(value: Option<&str>) -> Result<Self, FormatError> {
        match value.unwrap_or("string") {
            "boolean" => Ok(AttrType::Boolean),
            "int" | "long" => Ok(AttrType::Integer),
            "float" | "double" => Ok(AttrType::Float),
            "string" => Ok(AttrType::String),
            other => Err(FormatError::new(format!("unsupported attr.type '{}'", other))),
        }
    }

    fn value(self, raw: &str, key: &str) -> Result<PropertyValue, FormatError> {
        let text = raw.trim();
        let invalid = || FormatError::new(format!("invalid {:?} value '{}' for key '{}'", self, raw, key));
        match self {
            AttrType::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(PropertyValue::Boolean(true)),
                "false" | "0" => Ok(PropertyValue::Boolean(false)),
                _ => Err(invalid()),
            },
            AttrType::Integer => text.parse::<i64>().map(PropertyValue::Integer).map_err(|_| invalid()),
            AttrType::Float => text.parse::<f64>().map(PropertyValue::Float).map_err(|_| invalid()),
            AttrType::String => Ok(PropertyValue::String(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
struct KeySpec {
    name: String,
    domain: KeyDomain,
    kind: AttrType,
    default: Option<PropertyValue>,
}

#[derive(Debug)]
struct PendingEdge {
    source: String,
    target: String,
    directed: bool,
    attributes: PropertyMap,
}

#[derive(Debug, Clone, Copy)]
enum Owner {
    Graph,
    Node(usize),
    Edge(usize),
}

/// Text being collected for an open `<data>` or `<default>` element
#[derive(Debug)]
enum Capture {
    Data { key: String, text: String },
    Default { key: String, text: String },
}

#[derive(Debug, Default)]
struct GraphMlParser {
    keys: HashMap<String, KeySpec>,
    open_key: Option<String>,
    graph_depth: usize,
    seen_graph: bool,
    directed_default: bool,
    owners: Vec<Owner>,
    capture: Option<Capture>,
    graph_attributes: PropertyMap,
    nodes: Vec<(String, PropertyMap)>,
    edges: Vec<PendingEdge>,
}

/// Parse a GraphML document
pub fn parse(text: &str) -> Result<Parsed, FormatError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut parser = GraphMlParser {
        directed_default: true,
        ..Default::default()
    };
    let mut open_elements: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                parser.open(&e)?;
                open_elements.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Empty(e)) => {
                parser.open(&e)?;
                parser.close(e.local_name().as_ref())?;
            }
            Ok(Event::End(e)) => {
                parser.close(e.local_name().as_ref())?;
                open_elements.pop();
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|err| FormatError::new(format!("invalid text: {}", err)))?;
                parser.text(&text);
            }
            Ok(Event::CData(c)) => {
                let text = std::str::from_utf8(c.as_ref())
                    .map_err(|err| FormatError::new(format!("invalid CDATA: {}", err)))?;
                parser.text(text);
            }
            Ok(Event::Eof) => {
                if let Some(name) = open_elements.last() {
                    return Err(FormatError::new(format!(
                        "unexpected end of document inside <{}>",
                        name
                    )));
                }
                if parser.graph_depth > 0 || !parser.owners.is_empty() {
                    return Err(FormatError::new("unexpected end of document inside <graph>"));
                }
                if !parser.seen_graph {
                    return Err(FormatError::new("document has no <graph> element"));
                }
                break;
            }
            Ok(_) => {}
            Err(err) => {
                return Err(FormatError::new(format!(
                    "XML error at byte {}: {}",
                    reader.buffer_position(),
                    err
                )))
            }
        }
    }

    parser.finish()
}

fn attributes(e: &BytesStart) -> Result<HashMap<String, String>, FormatError> {
    let mut out = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| FormatError::new(format!("malformed attribute: {}", err)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| FormatError::new(format!("malformed attribute value: {}", err)))?
            .into_owned();
        out.insert(key, value);
    }
    Ok(out)
}

fn required(attrs: &HashMap<String, String>, name: &str, element: &str) -> Result<String, FormatError> {
    attrs
        .get(name)
        .cloned()
        .ok_or_else(|| FormatError::new(format!("<{}> is missing the '{}' attribute", element, name)))
}

impl GraphMlParser {
    fn open(&mut self, e: &BytesStart) -> Result<(), FormatError> {
        match e.local_name().as_ref() {
            b"key" => {
                let attrs = attributes(e)?;
                let id = required(&attrs, "id", "key")?;
                let spec = KeySpec {
                    name: attrs.get("attr.name").cloned().unwrap_or_else(|| id.clone()),
                    domain: KeyDomain::parse(attrs.get("for").map(String::as_str)),
                    kind: AttrType::parse(attrs.get("attr.type").map(String::as_str))?,
                    default: None,
                };
                self.keys.insert(id.clone(), spec);
                self.open_key = Some(id);
            }
            b"default" => {
                let key = self
                    .open_key
                    .clone()
                    .ok_or_else(|| FormatError::new("<default> outside of <key>"))?;
                self.capture = Some(Capture::Default { key, text: String::new() });
            }
            b"graph" => {
                if self.graph_depth > 0 {
                    return Err(FormatError::new("nested graphs are not supported"));
                }
                let attrs = attributes(e)?;
                self.directed_default = attrs.get("edgedefault").map(String::as_str) != Some("undirected");
                self.graph_depth += 1;
                self.seen_graph = true;
                self.owners.push(Owner::Graph);
            }
            b"node" => {
                let attrs = attributes(e)?;
                let id = required(&attrs, "id", "node")?;
                self.owners.push(Owner::Node(self.nodes.len()));
                self.nodes.push((id, PropertyMap::new()));
            }
            b"edge" => {
                let attrs = attributes(e)?;
                let source = required(&attrs, "source", "edge")?;
                let target = required(&attrs, "target", "edge")?;
                let directed = match attrs.get("directed").map(String::as_str) {
                    Some("true") => true,
                    Some("false") => false,
                    Some(other) => {
                        return Err(FormatError::new(format!("invalid directed value '{}'", other)))
                    }
                    None => self.directed_default,
                };
                self.owners.push(Owner::Edge(self.edges.len()));
                self.edges.push(PendingEdge {
                    source,
                    target,
                    directed,
                    attributes: PropertyMap::new(),
                });
            }
            b"data" => {
                let attrs = attributes(e)?;
                let key = required(&attrs, "key", "data")?;
                self.capture = Some(Capture::Data { key, text: String::new() });
            }
            b"hyperedge" => return Err(FormatError::new("hyperedges are not supported")),
            b"port" => return Err(FormatError::new("ports are not supported")),
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        match self.capture.as_mut() {
            Some(Capture::Data { text: buf, .. }) | Some(Capture::Default { text: buf, .. }) => {
                buf.push_str(text)
            }
            None => {}
        }
    }

    fn close(&mut self, name: &[u8]) -> Result<(), FormatError> {
        match name {
            b"key" => self.open_key = None,
            b"default" => {
                if let Some(Capture::Default { key, text }) = self.capture.take() {
                    if let Some(spec) = self.keys.get_mut(&key) {
                        spec.default = Some(spec.kind.value(&text, &key)?);
                    }
                }
            }
            b"data" => {
                if let Some(Capture::Data { key, text }) = self.capture.take() {
                    self.store_data(key, text)?;
                }
            }
            b"graph" => {
                self.graph_depth = self.graph_depth.saturating_sub(1);
                self.owners.pop();
            }
            b"node" | b"edge" => {
                self.owners.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn store_data(&mut self, key: String, text: String) -> Result<(), FormatError> {
        let (name, value) = match self.keys.get(&key) {
            Some(spec) => (spec.name.clone(), spec.kind.value(&text, &key)?),
            None => (key, PropertyValue::String(text)),
        };

        let target = match self.owners.last() {
            Some(Owner::Graph) => &mut self.graph_attributes,
            Some(Owner::Node(i)) => &mut self.nodes[*i].1,
            Some(Owner::Edge(i)) => &mut self.edges[*i].attributes,
            // <data> directly under <graphml> is ignored
            None => return Ok(()),
        };
        target.insert(name, value);
        Ok(())
    }

    fn apply_defaults(&self, attributes: &mut PropertyMap, owner: KeyDomain) {
        for spec in self.keys.values() {
            if let Some(default) = &spec.default {
                if spec.domain.covers(owner) && !attributes.contains_key(&spec.name) {
                    attributes.insert(spec.name.clone(), default.clone());
                }
            }
        }
    }

    fn finish(mut self) -> Result<Parsed, FormatError> {
        let mut builder = Graph::builder();

        let mut graph_attributes = std::mem::take(&mut self.graph_attributes);
        self.apply_defaults(&mut graph_attributes, KeyDomain::Graph);
        for (key, value) in graph_attributes {
            builder.set_graph_attribute(key, value);
        }

        let nodes = std::mem::take(&mut self.nodes);
        for (id, mut attrs) in nodes {
            self.apply_defaults(&mut attrs, KeyDomain::Node);
            builder.add_node(id, attrs)?;
        }

        let edges = std::mem::take(&mut self.edges);
        for mut edge in edges {
            self.apply_defaults(&mut edge.attributes, KeyDomain::Edge);
            if !edge.directed && edge.source != edge.target {
                builder.add_edge(edge.target.as_str(), edge.source.as_str(), edge.attributes.clone())?;
            }
            builder.add_edge(edge.source, edge.target, edge.attributes)?;
        }

        Ok(Parsed {
            duplicate_edges: builder.duplicate_edges(),
            graph: builder.build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="category" attr.type="string">
    <default>game</default>
  </key>
  <key id="d1" for="node" attr.name="year" attr.type="int"/>
  <key id="d2" for="edge" attr.name="weight" attr.type="double"/>
  <key id="d3" for="graph" attr.name="source" attr.type="string"/>
  <graph id="G" edgedefault="directed">
    <data key="d3">wikipedia</data>
    <node id="Street Fighter II"><data key="d1">1991</data></node>
    <node id="Capcom"><data key="d0">company</data></node>
    <node id="Arcade"/>
    <edge source="Street Fighter II" target="Capcom"><data key="d2">0.5</data></edge>
    <edge source="Street Fighter II" target="Arcade"/>
    <edge source="Street Fighter II" target="Arcade"/>
  </graph>
</graphml>"#;

    #[test]
    fn test_parse_sample() {
        let parsed = parse(SAMPLE).unwrap();
        let graph = parsed.graph;

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(parsed.duplicate_edges, 1);

        let sf2 = graph.node("Street Fighter II").unwrap();
        assert_eq!(sf2.get_attribute("year"), Some(&PropertyValue::Integer(1991)));
        assert_eq!(sf2.get_attribute("category"), Some(&PropertyValue::from("game")));

        let capcom = graph.node("Capcom").unwrap();
        assert_eq!(capcom.get_attribute("category"), Some(&PropertyValue::from("company")));

        assert_eq!(graph.edges()[0].get_attribute("weight"), Some(&PropertyValue::Float(0.5)));
        assert_eq!(graph.attributes().get("source"), Some(&PropertyValue::from("wikipedia")));
    }

    #[test]
    fn test_undirected_edges_become_reciprocal() {
        let xml = r#"<graphml><graph edgedefault="undirected">
            <node id="a"/><node id="b"/><node id="c"/>
            <edge source="a" target="b"/>
            <edge source="b" target="c" directed="true"/>
            <edge source="c" target="c"/>
        </graph></graphml>"#;
        let graph = parse(xml).unwrap().graph;
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.has_edge("a", "b"));
        assert!(graph.has_edge("b", "a"));
        assert!(graph.has_edge("b", "c"));
        assert!(!graph.has_edge("c", "b"));
        assert!(graph.has_edge("c", "c"));
    }

    #[test]
    fn test_edges_may_precede_nodes() {
        let xml = r#"<graphml><graph edgedefault="directed">
            <edge source="a" target="b"/>
            <node id="a"/><node id="b"/>
        </graph></graphml>"#;
        assert_eq!(parse(xml).unwrap().graph.edge_count(), 1);
    }

    #[test]
    fn test_dangling_endpoint_is_error() {
        let xml = r#"<graphml><graph><node id="a"/><edge source="a" target="zzz"/></graph></graphml>"#;
        let err = parse(xml).unwrap_err();
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_duplicate_node_is_error() {
        let xml = r#"<graphml><graph><node id="a"/><node id="a"/></graph></graphml>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_bad_typed_value_is_error() {
        let xml = r#"<graphml>
            <key id="y" for="node" attr.name="year" attr.type="int"/>
            <graph><node id="a"><data key="y">nineteen</data></node></graph></graphml>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_unsupported_constructs() {
        let nested = r#"<graphml><graph><node id="a"><graph/></node></graph></graphml>"#;
        assert!(parse(nested).is_err());

        let hyper = r#"<graphml><graph><node id="a"/><hyperedge/></graph></graphml>"#;
        assert!(parse(hyper).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse("<graphml><graph><node id=\"a\"></graph>").is_err());
    }

    #[test]
    fn test_truncated_document_is_error() {
        let truncated = r#"<graphml><graph edgedefault="directed"><node id="a"/><node id="b"/><edge source="a" target="b"/>"#;
        let err = parse(truncated).unwrap_err();
        assert!(err.to_string().contains("unexpected end of document"), "{}", err);

        let no_root_close = r#"<graphml><graph><node id="a"/></graph>"#;
        assert!(parse(no_root_close).is_err());

        let open_node = r#"<graphml><graph><node id="a">"#;
        assert!(parse(open_node).is_err());
    }

    #[test]
    fn test_document_without_graph_is_error() {
        let err = parse("<graphml></graphml>").unwrap_err();
        assert!(err.to_string().contains("no <graph>"), "{}", err);
        assert!(parse("").is_err());
    }

    #[test]
    fn test_escaped_text_and_unknown_key() {
        let xml = r#"<graphml><graph>
            <node id="Tom &amp; Jerry"><data key="raw">a &lt; b</data></node>
        </graph></graphml>"#;
        let graph = parse(xml).unwrap().graph;
        let node = graph.node("Tom & Jerry").unwrap();
        assert_eq!(node.get_attribute("raw"), Some(&PropertyValue::from("a < b")));
    }
}
