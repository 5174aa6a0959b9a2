//! passmark-report — Report generation for passmark score reports.

pub mod html;
