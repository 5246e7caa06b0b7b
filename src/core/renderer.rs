use std::collections::BTreeSet;

use crate::config::RenderingConfig;

use super::engine::Reconstruction;
use super::introspect::TypeRef;

/// Selects which reconstructed methods to render.
///
/// A selector argument that parses as an integer is a transaction code,
/// anything else is a method name; the enum keeps "both at once" out of
/// the type entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFilter {
    /// Render the full interface definition
    All,

    /// Render only the method dispatched by this transaction code
    Code(i64),

    /// Render only the method with this name
    Name(String),
}

impl RenderFilter {
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            None => RenderFilter::All,
            Some(s) => match s.parse::<i64>() {
                Ok(code) => RenderFilter::Code(code),
                Err(_) => RenderFilter::Name(s.to_string()),
            },
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RenderFilter::All)
    }

    pub fn matches(&self, code: i64, name: &str) -> bool {
        match self {
            RenderFilter::All => true,
            RenderFilter::Code(c) => *c == code,
            RenderFilter::Name(n) => n == name,
        }
    }
}

/// Display name for a type, collecting an import when one is needed.
///
/// Types from the implicit namespace and the interface's own package read
/// fine unqualified. Everything else is still displayed short, but its
/// canonical name goes into the import set so the definition stands on
/// its own. Primitives and arrays are spelled inline and never imported.
pub fn simplify_type(
    ty: &TypeRef,
    package_name: &str,
    implicit_namespace: &str,
    imports: &mut BTreeSet<String>,
) -> String {
    let foreign = !ty.canonical_name.starts_with(implicit_namespace)
        && !ty.canonical_name.starts_with(package_name);

    if foreign && !ty.is_primitive && !ty.is_array {
        imports.insert(ty.canonical_name.clone());
    }

    ty.simple_name().to_string()
}

/// Synthesized positional parameter name: n for int/long, s for strings,
/// p for everything else.
fn param_name(ty: &TypeRef, ordinal: usize) -> String {
    match ty.canonical_name.as_str() {
        "int" | "long" => format!("n{}", ordinal),
        "java.lang.String" => format!("s{}", ordinal),
        _ => format!("p{}", ordinal),
    }
}

fn simple_exception_name(canonical: &str) -> &str {
    match canonical.rfind('.') {
        Some(idx) => &canonical[idx + 1..],
        None => canonical,
    }
}

/// Render a reconstruction as text.
///
/// With a filter, only the matching method signature lines are emitted
/// (blank-line separated when several match). Without one, the output is
/// a complete interface definition: header comment, package declaration,
/// sorted imports, and the interface block with one signature per method
/// in transaction code order. An empty selection renders as an empty
/// string, not an error.
pub fn render(
    recon: &Reconstruction,
    filter: &RenderFilter,
    show_codes: bool,
    config: &RenderingConfig,
) -> String {
    let mut imports = BTreeSet::new();
    let mut lines = Vec::new();
    let throws = simple_exception_name(&config.remote_exception);

    for method in &recon.methods {
        if !filter.matches(method.code, &method.name) {
            continue;
        }

        let mut params = Vec::new();

        for (i, param) in method.params.iter().enumerate() {
            let display = simplify_type(
                param,
                &recon.package,
                &config.implicit_namespace,
                &mut imports,
            );
            params.push(format!("{} {}", display, param_name(param, i + 1)));
        }

        let return_display = simplify_type(
            &method.return_type,
            &recon.package,
            &config.implicit_namespace,
            &mut imports,
        );

        lines.push(format!(
            "{} {}({}) throws {};{}",
            return_display,
            method.name,
            params.join(", "),
            throws,
            if show_codes {
                format!(" // {}", method.code)
            } else {
                String::new()
            },
        ));
    }

    if !filter.is_all() {
        return lines.join("\n\n");
    }

    let mut out = String::new();

    out.push_str(&format!(
        "// Service: {}, Interface: {}\n",
        recon.service, recon.interface_id
    ));
    out.push_str(&format!("package {};\n\n", recon.package));

    if !imports.is_empty() {
        for import in &imports {
            out.push_str(&format!("import {};\n", import));
        }
        out.push('\n');
    }

    out.push_str(&format!("interface {} {{\n", recon.interface_name));

    let body: Vec<String> = lines.iter().map(|l| format!("    {}", l)).collect();
    out.push_str(&body.join("\n\n"));

    out.push_str("\n}\n");
    out
}
