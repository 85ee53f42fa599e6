//! Terminal rendering of forms and transcript messages.

use colored::Colorize;
use docgen_core::conversation::ConversationMessage;
use docgen_core::form::RenderNode;

const INDENT: &str = "  ";

pub fn print_form(nodes: &[RenderNode]) {
    if nodes.is_empty() {
        println!("{}", "(no form yet)".bright_black());
        return;
    }
    for node in nodes {
        print_node(node, 0);
    }
}

fn print_node(node: &RenderNode, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        RenderNode::InputField {
            path,
            label,
            value,
            placeholder,
        } => {
            let shown = if value.is_empty() {
                placeholder.bright_black().italic()
            } else {
                value.normal()
            };
            println!(
                "{}{} {} {}",
                pad,
                format!("{}:", label).bold(),
                shown,
                format!("[{}]", path).bright_black()
            );
        }
        RenderNode::GroupSection {
            label, children, ..
        } => {
            println!("{}{}", pad, label.bright_magenta().bold());
            for child in children {
                print_node(child, depth + 1);
            }
        }
        RenderNode::ArraySection {
            label, items, add, ..
        } => {
            println!("{}{}", pad, label.bright_magenta().bold());
            for item in items {
                println!(
                    "{}{}{} {}",
                    pad,
                    INDENT,
                    item.heading.cyan(),
                    format!("(/delete {} {})", item.delete.path, item.delete.index).bright_black()
                );
                for child in &item.children {
                    print_node(child, depth + 2);
                }
            }
            let control = format!("{}{}(/add {})", pad, INDENT, add.path);
            if add.enabled {
                println!("{} {}", control.green(), add.label.green());
            } else {
                println!("{} {}", control.bright_black(), add.label.bright_black().strikethrough());
            }
        }
    }
}

pub fn print_message(message: &ConversationMessage) {
    let label = message.sender_label();
    if message.from_bot {
        for line in message.text.lines() {
            println!("{}{}", label.bright_blue().bold(), line.bright_blue());
        }
    } else {
        println!("{}", format!("{}{}", label, message.text).green());
    }
}
