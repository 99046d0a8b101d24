//! Block tree → markdown rendering.
//!
//! Column layouts have no markdown form. A column's children are rendered to
//! HTML eagerly and wrapped in a div, because the final markdown renderer does
//! not process markdown inside raw HTML blocks. Everything else stays markdown.

use crate::markdown::html::render_html;
use crate::notion::models::{plain_text, Block, RichText};

const COLUMN_LIST_OPEN: &str =
    r#"<div class="notion-column-list flex flex-col md:flex-row gap-6 my-4 w-full">"#;
const COLUMN_OPEN: &str =
    r#"<div class="notion-column flex-1 min-w-0 [&>*:first-child]:mt-0 [&>*:last-child]:mb-0">"#;

const LIST_KINDS: &[&str] = &["bulleted_list_item", "numbered_list_item", "to_do"];

/// A block with its fetched children.
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub block: Block,
    pub children: Vec<BlockNode>,
}

/// Renders sibling blocks. Runs of the same list kind are joined by a single
/// newline; everything else is separated by a blank line.
pub fn render_blocks(nodes: &[BlockNode]) -> String {
    let mut out = String::new();
    let mut prev_list: Option<&str> = None;
    let mut number = 0;

    for node in nodes {
        let kind = node.block.kind.as_str();
        if kind == "numbered_list_item" {
            number = if prev_list == Some(kind) { number + 1 } else { 1 };
        }

        let rendered = render_block(node, number);
        if rendered.is_empty() {
            // A dropped block still ends the current list run.
            prev_list = None;
            continue;
        }

        let is_list = LIST_KINDS.contains(&kind);
        if !out.is_empty() {
            out.push_str(if is_list && prev_list == Some(kind) { "\n" } else { "\n\n" });
        }
        out.push_str(&rendered);
        prev_list = is_list.then_some(kind);
    }

    out
}

/// Renders one block. `number` is the ordinal for numbered list items.
/// Unsupported block types render as an empty string.
pub fn render_block(node: &BlockNode, number: usize) -> String {
    let block = &node.block;
    let content = block.content();
    let text = inline(&content.rich_text);

    match block.kind.as_str() {
        "paragraph" => with_children(text, node),
        "heading_1" => with_children(format!("# {text}"), node),
        "heading_2" => with_children(format!("## {text}"), node),
        "heading_3" => with_children(format!("### {text}"), node),
        "bulleted_list_item" => list_item("- ", &text, node),
        "numbered_list_item" => list_item(&format!("{number}. "), &text, node),
        "to_do" => {
            let marker = if content.checked { "- [x] " } else { "- [ ] " };
            list_item(marker, &text, node)
        }
        "quote" => quoted(&with_children(text, node)),
        "callout" => {
            let body = match content.icon.and_then(|i| i.emoji) {
                Some(emoji) => format!("{emoji} {text}"),
                None => text,
            };
            quoted(&with_children(body, node))
        }
        "code" => fenced(&plain_text(&content.rich_text), content.language.as_deref()),
        "divider" => "---".to_string(),
        "equation" => match content.expression {
            Some(expr) => format!("$$\n{expr}\n$$"),
            None => String::new(),
        },
        "image" => match content.media_url() {
            Some(url) => format!("![{}]({url})", plain_text(&content.caption)),
            None => String::new(),
        },
        "video" | "file" | "pdf" | "audio" => {
            let label = non_empty(plain_text(&content.caption)).or(content.name.clone());
            link(label, content.media_url())
        }
        "bookmark" | "embed" | "link_preview" => {
            link(non_empty(plain_text(&content.caption)), content.url.as_deref())
        }
        "toggle" => {
            let children = render_blocks(&node.children);
            format!("<details><summary>{text}</summary>\n\n{children}\n\n</details>")
        }
        "table" => table(node),
        "column_list" => {
            let columns: String = node.children.iter().map(|c| render_block(c, 0)).collect();
            format!("{COLUMN_LIST_OPEN}\n{columns}\n</div>")
        }
        "column" => {
            let inner = render_html(&render_blocks(&node.children));
            format!("{COLUMN_OPEN}\n{}\n</div>", without_blank_lines(inner.trim_end()))
        }
        _ => String::new(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn with_children(head: String, node: &BlockNode) -> String {
    if node.children.is_empty() {
        return head;
    }
    let children = render_blocks(&node.children);
    if head.is_empty() {
        children
    } else {
        format!("{head}\n\n{children}")
    }
}

/// Rewrites an HTML fragment so it has no blank lines, which would end the
/// enclosing raw HTML block. A newline ahead of a blank line becomes `&#10;`,
/// so text inside `<pre>` keeps its line breaks.
fn without_blank_lines(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for (i, line) in html.split('\n').enumerate() {
        if i > 0 {
            out.push_str(if line.trim().is_empty() { "&#10;" } else { "\n" });
        }
        out.push_str(line);
    }
    out
}

fn list_item(marker: &str, text: &str, node: &BlockNode) -> String {
    let mut out = format!("{marker}{text}");
    if let Some(first) = node.children.first() {
        let pad = " ".repeat(marker.len());
        // Nested lists attach directly; other content needs a blank line or
        // it would read as a lazy continuation of the item text.
        let nested_list = LIST_KINDS.contains(&first.block.kind.as_str());
        out.push_str(if nested_list { "\n" } else { "\n\n" });
        out.push_str(&indent(&render_blocks(&node.children), &pad));
    }
    out
}

fn indent(text: &str, pad: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quoted(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fenced(code: &str, language: Option<&str>) -> String {
    let lang = match language {
        Some("plain text") | None => "",
        Some(l) => l,
    };
    // Fence must be longer than any backtick run inside the code.
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    format!("{fence}{lang}\n{code}\n{fence}")
}

fn link(label: Option<String>, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("[{}]({url})", label.unwrap_or_else(|| url.to_string())),
        None => String::new(),
    }
}

fn table(node: &BlockNode) -> String {
    let rows: Vec<Vec<String>> = node
        .children
        .iter()
        .filter(|c| c.block.kind == "table_row")
        .map(|c| c.block.content().cells.iter().map(|cell| table_cell(cell)).collect())
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let line = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(width, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut out = vec![line(rows[0].as_slice()), format!("|{}", " --- |".repeat(width))];
    out.extend(rows[1..].iter().map(|r| line(r.as_slice())));
    out.join("\n")
}

fn table_cell(cell: &[RichText]) -> String {
    inline(cell).replace('|', "\\|").replace('\n', "<br>")
}

/// Renders rich text with markdown annotations.
pub fn inline(segments: &[RichText]) -> String {
    segments.iter().map(segment).collect()
}

fn segment(rt: &RichText) -> String {
    if let Some(eq) = &rt.equation {
        return format!("${}$", eq.expression);
    }

    let text = rt.plain_text.as_str();
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    // Markers go inside surrounding whitespace: `**bold** `, not `**bold **`.
    let start = text.len() - text.trim_start().len();
    let end = start + core.len();

    let a = &rt.annotations;
    let mut s = core.to_string();
    if a.code {
        s = format!("`{s}`");
    }
    if a.strikethrough {
        s = format!("~~{s}~~");
    }
    if a.italic {
        s = format!("_{s}_");
    }
    if a.bold {
        s = format!("**{s}**");
    }
    if let Some(href) = &rt.href {
        s = format!("[{s}]({href})");
    }

    format!("{}{s}{}", &text[..start], &text[end..])
}
