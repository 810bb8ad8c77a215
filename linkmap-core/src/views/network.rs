use crate::config::NetworkStyle;
use crate::error::Result;
use crate::graph::LinkGraph;
use crate::report::html_escape;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: String,
    size: u32,
}

#[derive(Debug, Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
}

/// Standalone interactive network page (vis-network). Node size and tooltip
/// follow each page's in-degree. Built entirely in memory.
pub fn render_network_html(graph: &LinkGraph, style: &NetworkStyle) -> Result<String> {
    let stats = graph.node_stats(&style.sizing);

    let nodes: Vec<VisNode> = stats
        .iter()
        .map(|node| VisNode {
            id: &node.id,
            label: &node.id,
            title: format!("{}\nIncoming links: {}", node.id, node.in_degree),
            size: node.size,
        })
        .collect();

    let edges: Vec<VisEdge> = graph
        .links()
        .map(|(from, to)| VisEdge { from, to })
        .collect();

    debug!("Rendering network view: {} nodes, {} edges", nodes.len(), edges.len());

    let nodes_json = script_safe(&serde_json::to_string(&nodes)?);
    let edges_json = script_safe(&serde_json::to_string(&edges)?);

    let html = format!(
        r###"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Internal link network</title>
    <script src="https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js"></script>
    <style>
        body {{ margin: 0; background: {background}; font-family: Arial, sans-serif; }}
        #network {{ width: 100%; height: {height}; }}
        .summary {{ position: absolute; top: 10px; left: 10px; color: {font}; opacity: 0.8; }}
    </style>
</head>
<body>
    <div class="summary">{node_count} pages, {edge_count} links</div>
    <div id="network"></div>
    <script>
        const nodes = new vis.DataSet({nodes_json});
        const edges = new vis.DataSet({edges_json});
        const options = {{
            nodes: {{ shape: "dot", font: {{ color: "{font}" }} }},
            edges: {{ arrows: "to", color: {{ inherit: true }}, smooth: {{ type: "continuous" }} }},
            physics: {{ enabled: true, stabilization: {{ iterations: 200 }} }},
            interaction: {{ hover: true, tooltipDelay: 100, zoomView: true, dragNodes: true }}
        }};
        new vis.Network(document.getElementById("network"), {{ nodes, edges }}, options);
    </script>
</body>
</html>
"###,
        background = html_escape(&style.background),
        height = html_escape(&style.height),
        font = html_escape(&style.font_color),
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        nodes_json = nodes_json,
        edges_json = edges_json,
    );

    Ok(html)
}

/// Keep data from closing the surrounding <script> element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
