//! Headless renderer: lays a view tree out as indented text lines.

use settle_core::{Role, View, ViewKind};

const INDENT: &str = "  ";

pub fn render_text(root: &View) -> String {
    let mut lines = Vec::new();
    render_into(root, 0, &mut lines);
    lines.join("\n")
}

fn render_into(view: &View, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    let alert = view.semantics.as_ref().is_some_and(|s| s.role == Role::Alert);
    match &view.kind {
        ViewKind::Text { text } => lines.push(format!("{pad}{text}")),
        ViewKind::Button { text, .. } => lines.push(format!("{pad}[ {text} ]")),
        ViewKind::TextField { hint, value, .. } => {
            lines.push(format!("{pad}{hint}: [{value}_]"));
        }
        ViewKind::ProgressBar { label } => lines.push(format!("{pad}... {label}")),
        ViewKind::Row => {
            // Children share one line.
            let mut inline = Vec::new();
            for c in &view.children {
                let mut sub = Vec::new();
                render_into(c, 0, &mut sub);
                inline.extend(sub);
            }
            if !inline.is_empty() {
                lines.push(format!("{pad}{}", inline.join("  ")));
            }
            return;
        }
        ViewKind::Column => {}
    }
    let child_depth = if alert {
        lines.push(format!("{pad}!"));
        depth + 1
    } else {
        depth
    };
    for c in &view.children {
        render_into(c, child_depth, lines);
    }
}
