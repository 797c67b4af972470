//! GraphML rendering with minimal yEd styling.

use crate::core::{Graph, Trigger};
use std::fmt::Write as _;
use std::io;
use std::path::Path;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const YED_NS: &str = "http://www.yworks.com/xml/graphml";

/// Render `graph` as a GraphML document.
///
/// Each state becomes a `node` with the state name as id and label; the
/// default state is drawn as a rounded rectangle. Each transition becomes
/// an `edge` with the transition name as id and label.
///
/// # Example
///
/// ```rust
/// use active_machine::core::{Graph, State, Transition};
/// use active_machine::export::to_graphml;
///
/// let graph = Graph::new(vec![
///     State::new("A").as_default().with_transition(Transition::new("go", "A", "B").with_name("edge1")),
///     State::new("B"),
/// ])
/// .unwrap();
///
/// let xml = to_graphml("machine", &graph);
/// assert!(xml.contains(r#"<node id="A">"#));
/// assert!(xml.contains(r#"<edge id="edge1" source="A" target="B">"#));
/// ```
pub fn to_graphml<T: Trigger>(machine_name: &str, graph: &Graph<T>) -> String {
    let mut xml = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = writeln!(xml, r#"<graphml xmlns="{GRAPHML_NS}" xmlns:y="{YED_NS}">"#);
    let _ = writeln!(xml, r#"  <key id="d0" for="node" yfiles.type="nodegraphics" />"#);
    let _ = writeln!(xml, r#"  <key id="d1" for="edge" yfiles.type="edgegraphics" />"#);
    let _ = writeln!(
        xml,
        r#"  <graph id="{}" edgedefault="directed">"#,
        escape(machine_name)
    );

    for state in graph.iter() {
        let name = escape(state.name());
        let shape = if state.is_default() {
            "roundrectangle"
        } else {
            "rectangle"
        };

        let _ = writeln!(xml, r#"    <node id="{name}">"#);
        let _ = writeln!(xml, r#"      <data key="d0">"#);
        let _ = writeln!(xml, r#"        <y:ShapeNode>"#);
        let _ = writeln!(xml, r#"          <y:NodeLabel>{name}</y:NodeLabel>"#);
        let _ = writeln!(xml, r#"          <y:Shape type="{shape}" />"#);
        let _ = writeln!(xml, r#"        </y:ShapeNode>"#);
        let _ = writeln!(xml, r#"      </data>"#);
        let _ = writeln!(xml, r#"    </node>"#);
    }

    for transition in graph.iter().flat_map(|state| state.transitions()) {
        let name = escape(transition.name());

        let _ = writeln!(
            xml,
            r#"    <edge id="{name}" source="{}" target="{}">"#,
            escape(transition.source()),
            escape(transition.target())
        );
        let _ = writeln!(xml, r#"      <data key="d1">"#);
        let _ = writeln!(xml, r#"        <y:PolyLineEdge>"#);
        let _ = writeln!(xml, r#"          <y:EdgeLabel>{name}</y:EdgeLabel>"#);
        let _ = writeln!(xml, r#"        </y:PolyLineEdge>"#);
        let _ = writeln!(xml, r#"      </data>"#);
        let _ = writeln!(xml, r#"    </edge>"#);
    }

    let _ = writeln!(xml, "  </graph>");
    let _ = writeln!(xml, "</graphml>");
    xml
}

/// Write the GraphML rendering of `graph` to `path`.
pub fn save_graphml<T: Trigger>(
    machine_name: &str,
    graph: &Graph<T>,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    std::fs::write(path, to_graphml(machine_name, graph))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, Transition};

    fn graph() -> Graph<&'static str> {
        Graph::new(vec![
            State::new("A")
                .as_default()
                .with_transition(Transition::new("t1", "A", "B").with_name("edge1")),
            State::new("B").with_transition(Transition::new("t2", "B", "A")),
        ])
        .unwrap()
    }

    #[test]
    fn declares_yed_keys() {
        let xml = to_graphml("machine", &graph());

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<graphml"));
        assert!(xml.contains(r#"<key id="d0" for="node" yfiles.type="nodegraphics" />"#));
        assert!(xml.contains(r#"<key id="d1" for="edge" yfiles.type="edgegraphics" />"#));
        assert!(xml.contains(r#"<graph id="machine" edgedefault="directed">"#));
    }

    #[test]
    fn one_node_per_state_one_edge_per_transition() {
        let xml = to_graphml("machine", &graph());

        assert_eq!(xml.matches("<node ").count(), 2);
        assert_eq!(xml.matches("<edge ").count(), 2);
        assert!(xml.contains(r#"<node id="A">"#));
        assert!(xml.contains(r#"<node id="B">"#));
        assert!(xml.contains(r#"<edge id="edge1" source="A" target="B">"#));
        assert!(xml.contains(r#"<edge id="B --t2--&gt; A" source="B" target="A">"#));
    }

    #[test]
    fn default_state_is_rounded() {
        let xml = to_graphml("machine", &graph());

        assert_eq!(xml.matches(r#"<y:Shape type="roundrectangle" />"#).count(), 1);
        assert_eq!(xml.matches(r#"<y:Shape type="rectangle" />"#).count(), 1);
    }

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");

        let graph: Graph<&str> = Graph::new(vec![State::new("<start>").as_default()]).unwrap();
        let xml = to_graphml("m&m", &graph);

        assert!(xml.contains(r#"<graph id="m&amp;m""#));
        assert!(xml.contains(r#"<node id="&lt;start&gt;">"#));
    }

    #[test]
    fn saves_to_file() {
        let path = std::env::temp_dir().join(format!("graph-{}.graphml", uuid::Uuid::new_v4()));

        save_graphml("machine", &graph(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(contents.contains("<graphml"));
        assert!(contents.contains(r#"<node id="A">"#));
    }
}
