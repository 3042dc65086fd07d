//! Terminal rendering of panels and notices.

use calc_client::view::{result_text, NOT_FOUND_PREFIX, LIST_FAILED};
use calc_client::{ListPanel, LookupPanel, Notice, View};
use calc_core::wire::{ExpressionRecord, Task};

pub struct TerminalView;

impl View for TerminalView {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Submitted { .. } | Notice::ResultAccepted { .. } => {
                println!("✓ {}", notice.message())
            }
            _ => eprintln!("✗ {}", notice.message()),
        }
    }

    fn render_lookup(&self, panel: &LookupPanel) {
        match panel {
            LookupPanel::Found(record) => {
                println!("═══════════════════════════════════════");
                println!("  Expression {}", record.id);
                println!("═══════════════════════════════════════");
                print_record(record);
            }
            LookupPanel::NotFound { id } => println!("{} {}", NOT_FOUND_PREFIX, id),
        }
    }

    fn render_list(&self, panel: &ListPanel) {
        match panel {
            ListPanel::Failed => println!("{}", LIST_FAILED),
            ListPanel::Records(records) if records.is_empty() => println!("No expressions."),
            ListPanel::Records(records) => {
                println!("═══════════════════════════════════════");
                println!("  Expressions ({})", records.len());
                println!("═══════════════════════════════════════");
                for record in records {
                    print_record(record);
                }
            }
        }
    }

    fn render_task(&self, task: &Task) {
        println!("═══════════════════════════════════════");
        println!("  Task {}", task.id);
        println!("═══════════════════════════════════════");
        println!("  ┌─ {} {} {}", task.arg1, task.operation, task.arg2);
        println!("  │  argument 1 : {}", task.arg1);
        println!("  │  argument 2 : {}", task.arg2);
        println!("  │  operation  : {}", task.operation);
        println!("  └─ duration   : {} s", task.operation_time);
    }
}

fn print_record(record: &ExpressionRecord) {
    let icon = match record.status.as_str() {
        "done" | "completed" => "✓",
        "error" | "failed" => "✗",
        _ => "…",
    };
    println!("  ┌─ {} {}", icon, record.id);
    println!("  │  expression : {}", record.expression);
    println!("  │  status     : {}", record.status);
    println!("  └─ result     : {}", result_text(record));
}
