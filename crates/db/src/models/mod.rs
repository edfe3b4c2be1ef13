//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus the enriched shapes the views hand to the presentation
//! layer. Inputs for inserts and updates are the validated form values from
//! `eventdesk_core::forms`.

pub mod category;
pub mod dashboard;
pub mod event;
pub mod participant;
