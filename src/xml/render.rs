//! Fragment rendering.
//!
//! Every function here is total: any entity state produces a well-formed
//! element.

use std::fmt::Display;

use crate::entity::{Entity, Record};
use crate::xml::escape;

/// Render an entity as a single element.
///
/// Invalid entities carry only `id` and `status`. Valid ones carry `id`,
/// `name` and then whichever of `deadline`, `urgency`, `importance` are
/// present, in that order. A present body makes the element non-empty.
pub fn render(entity: &Entity) -> String {
    match entity.record() {
        Some(record) => render_record(entity.id(), record),
        None => render_invalid(entity.kind().tag(), entity.id()),
    }
}

/// `<tag id='ID' status='invalid'/>`
pub fn render_invalid(tag: &str, id: impl Display) -> String {
    format!("<{tag} id='{}' status='invalid'/>", escape(&id.to_string()))
}

/// `<resource>PATH</resource>`
pub fn render_resource(path: &str) -> String {
    format!("<resource>{}</resource>", escape(path))
}

fn render_record(id: i64, record: &Record) -> String {
    let tag = record.kind().tag();
    let fields = record.fields();

    let mut out = format!("<{tag} id='{id}' name='{}'", escape(fields.name));
    if let Some(deadline) = fields.deadline {
        out.push_str(&format!(" deadline='{deadline}'"));
    }
    if let Some(urgency) = fields.urgency {
        out.push_str(&format!(" urgency='{urgency}'"));
    }
    if let Some(importance) = fields.importance {
        out.push_str(&format!(" importance='{importance}'"));
    }

    match fields.body {
        Some(body) => out.push_str(&format!(">{}</{tag}>", escape(body))),
        None => out.push_str("/>"),
    }
    out
}
