use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use cplus_model::{RuleConfiguration, RuleResult, ValidationCategory, ValidationResult};

pub fn print_summary(result: &ValidationResult) {
    println!("Component type: {}", result.component_type);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Category"),
        header_cell("Status"),
        header_cell("Summary"),
    ]);
    apply_table_style(&mut table);
    for rule in &result.rule_results {
        table.add_row(vec![
            Cell::new(rule.rule_name()),
            Cell::new(rule.category().label()),
            status_cell(rule),
            Cell::new(&rule.summary),
        ]);
    }
    println!("{table}");
    print_details(result);

    let errors = result.errors().count();
    let warnings = result.warnings().count();
    if result.success() {
        println!("Validation passed ({warnings} warnings).");
    } else {
        println!("Validation failed ({errors} errors, {warnings} warnings).");
    }
}

fn print_details(result: &ValidationResult) {
    let failed: Vec<&RuleResult> = result
        .rule_results
        .iter()
        .filter(|rule| !rule.success)
        .collect();
    if failed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Group"),
        header_cell("Datasets"),
        header_cell("Recommendation"),
    ]);
    apply_table_style(&mut table);
    for rule in failed {
        for (label, value) in &rule.details {
            table.add_row(vec![
                Cell::new(rule.rule_name()),
                Cell::new(label),
                Cell::new(value),
                Cell::new(&rule.recommendation).fg(Color::DarkGrey),
            ]);
        }
    }
    println!("{table}");
}

pub fn print_rules(configs: &[RuleConfiguration]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Category"),
        header_cell("Description"),
        header_cell("Recommendation"),
    ]);
    apply_table_style(&mut table);
    for config in configs {
        table.add_row(vec![
            Cell::new(&config.rule_name),
            category_cell(config.category),
            Cell::new(&config.description),
            Cell::new(&config.recommendation),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(rule: &RuleResult) -> Cell {
    if rule.success {
        return Cell::new("pass").fg(Color::Green);
    }
    match rule.category() {
        ValidationCategory::Error => Cell::new("fail").fg(Color::Red),
        ValidationCategory::Warning => Cell::new("warn").fg(Color::Yellow),
    }
}

fn category_cell(category: ValidationCategory) -> Cell {
    let color = match category {
        ValidationCategory::Error => Color::Red,
        ValidationCategory::Warning => Color::Yellow,
    };
    Cell::new(category.label()).fg(color)
}
