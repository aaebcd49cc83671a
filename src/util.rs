//! Text summaries of adapters and data values.

use crate::adapter::VariableAdapter;
use crate::error::Result;
use crate::model::{Data, DomainSet, RepresentationalSet};

/// Samples shown per row before eliding the rest.
const PREVIEW_LEN: usize = 8;

/// Format a count with thousand separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    out.push_str(&digits[..head]);
    for group in digits.as_bytes()[head..].chunks(3) {
        if !out.is_empty() {
            out.push(',');
        }
        out.extend(group.iter().map(|&b| char::from(b)));
    }
    out
}

/// Format a value with magnitude-dependent precision.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if val.fract() == 0.0 {
        format!("{}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Representational sets as a comma-separated list.
pub fn format_sets(sets: &[Option<RepresentationalSet>]) -> String {
    if sets.is_empty() {
        return "(none)".to_string();
    }
    sets.iter()
        .map(|s| s.map_or_else(|| "-".to_string(), |s| s.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adapter tree with the math type of every node.
pub fn format_adapter_tree(adapter: &VariableAdapter) -> String {
    format_tree_recursive(adapter, "", true)
}

fn format_tree_recursive(adapter: &VariableAdapter, prefix: &str, is_last: bool) -> String {
    let mut result = String::new();

    let connector = if is_last { "└── " } else { "├── " };
    result.push_str(&format!(
        "{}{}{} ({}): {}\n",
        prefix,
        connector,
        adapter.name(),
        adapter.kind(),
        adapter.math_type()
    ));

    let new_prefix = format!("{}{}   ", prefix, if is_last { " " } else { "│" });

    let children = child_adapters(adapter);
    for (i, child) in children.iter().enumerate() {
        let is_last_child = i == children.len() - 1;
        result.push_str(&format_tree_recursive(child, &new_prefix, is_last_child));
    }

    result
}

fn child_adapters(adapter: &VariableAdapter) -> Vec<&VariableAdapter> {
    match adapter {
        VariableAdapter::Scalar(_) => Vec::new(),
        VariableAdapter::Structure(a) => a.members().iter().map(|m| m.as_ref()).collect(),
        VariableAdapter::Sequence(a) => match a.row().as_ref() {
            VariableAdapter::Structure(row) => row.members().iter().map(|m| m.as_ref()).collect(),
            row => vec![row],
        },
        VariableAdapter::List(a) => vec![a.template().as_ref()],
        VariableAdapter::Array(a) => vec![a.template().as_ref()],
        VariableAdapter::Grid(a) => vec![a.template().as_ref()],
    }
}

/// Materialize and format a data value.
pub fn format_data(data: &Data) -> Result<String> {
    let mut out = String::new();
    format_data_into(data, "", &mut out)?;
    Ok(out)
}

fn format_data_into(data: &Data, indent: &str, out: &mut String) -> Result<()> {
    match data {
        Data::Real(r) => out.push_str(&format!("{}{} = {}\n", indent, r.ty, format_value(r.value))),
        Data::Text(t) => out.push_str(&format!("{}{} = \"{}\"\n", indent, t.ty.name(), t.value)),
        Data::Tuple(t) => {
            out.push_str(&format!("{}{}\n", indent, t.ty));
            let inner = format!("{indent}  ");
            for component in &t.components {
                format_data_into(component, &inner, out)?;
            }
        },
        Data::FlatField(field) => {
            out.push_str(&format!(
                "{}{} over {} points\n",
                indent,
                field.math_type(),
                format_count(field.len())
            ));
            let values = field.values()?;
            let names: Vec<String> = field
                .math_type()
                .as_function()
                .map(|f| f.range().real_components().iter().map(|s| s.name().to_string()).collect())
                .unwrap_or_default();
            for (row, name) in values.rows().into_iter().zip(names) {
                out.push_str(&format!("{}  {}: {}\n", indent, name, preview(row.iter().copied(), row.len())));
            }
        },
        Data::Field(field) => {
            out.push_str(&format!(
                "{}{} over {} points\n",
                indent,
                field.math_type(),
                format_count(field.len())
            ));
            let inner = format!("{indent}  ");
            for index in 0..field.len().min(PREVIEW_LEN) {
                format_data_into(&field.sample(index)?, &inner, out)?;
            }
            if field.len() > PREVIEW_LEN {
                out.push_str(&format!("{inner}...\n"));
            }
        },
        Data::Set(set) => {
            let samples = match set {
                DomainSet::Gridded1D { samples, .. } => preview(samples.iter().copied(), samples.len()),
                other => format!("{} points", format_count(other.len())),
            };
            out.push_str(&format!("{}{} in {}\n", indent, set.math_type(), samples));
        },
    }
    Ok(())
}

fn preview(values: impl Iterator<Item = f64>, len: usize) -> String {
    let mut parts: Vec<String> = values.take(PREVIEW_LEN).map(format_value).collect();
    if len > PREVIEW_LEN {
        parts.push("...".to_string());
    }
    format!("[{}]", parts.join(", "))
}
