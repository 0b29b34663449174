use assetr_common::config::Config;
use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::CanonicalDeviceRecord;
use assetr_core::query::{self, Entity, FieldDescriptor};
use colored::*;

use crate::commands::EntityArg;
use crate::terminal::{colors, print};

pub fn fields(entity: EntityArg, partial: Option<&str>, cfg: &Config) {
    match entity {
        EntityArg::Devices => show::<CanonicalDeviceRecord>(partial, cfg),
        EntityArg::Assets => show::<AssetRecord>(partial, cfg),
    }
}

fn show<T: Entity>(partial: Option<&str>, cfg: &Config) {
    let Some(input) = partial else {
        let registry = T::registry();
        print::set_key_width(registry.iter().map(|field| field.key));
        for field in registry.iter() {
            print::aligned_line(field.key, describe(field, cfg));
        }
        return;
    };

    let suggestions = query::suggest::<T>(input);
    if suggestions.is_empty() {
        print::no_results("fields");
        return;
    }

    print::set_key_width(suggestions.iter().map(|field| field.key));
    for field in suggestions {
        let completed = query::apply_suggestion(input, field.key);
        print::aligned_line(field.key, completed.color(colors::ACCENT));
    }
}

fn describe<T>(field: &FieldDescriptor<T>, cfg: &Config) -> String {
    let mut out = format!("{} ({})", field.label, field.field_type);
    if field.searchable {
        out.push_str(" *");
    }
    if cfg.quiet > 0 {
        return out;
    }
    match field.options {
        Some(options) => out.push_str(&format!(", one of {}", options.join("|"))),
        None => out.push_str(&format!(", e.g. {}", field.example)),
    }
    out
}
