//! Artifact generation
//!
//! Pure string building: one text block per region, lines in symbol order.

use glsync_core::config::NamingConfig;
use glsync_core::{RegionKey, ResolvedSymbol};

/// Generated text for every region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub gldefs: String,
    pub undefs: String,
    pub redefs: String,
    pub reversedefs: String,
    pub typedefs: String,
    pub protos: String,
}

impl Artifacts {
    /// Build all blocks from resolved symbols in canonical order
    pub fn generate(resolved: &[ResolvedSymbol], naming: &NamingConfig) -> Self {
        let names = Naming::new(naming);

        let entries: Vec<String> = resolved
            .iter()
            .map(|r| {
                let raw = r.symbol.as_str();
                format!(
                    "{}({}, {}, {})",
                    naming.entry_macro,
                    raw,
                    names.alias(raw),
                    names.pointer(raw)
                )
            })
            .collect();
        let mut gldefs = format!("#define {} \\\n", naming.table_macro);
        gldefs.push_str(&entries.join(" \\\n"));

        Self {
            gldefs,
            undefs: lines(resolved, |r| format!("#undef {}", r.symbol)),
            redefs: lines(resolved, |r| {
                format!("#define {} {}", r.symbol, names.alias(r.symbol.as_str()))
            }),
            reversedefs: lines(resolved, |r| {
                format!("#define {} {}", names.alias(r.symbol.as_str()), r.symbol)
            }),
            typedefs: lines(resolved, |r| {
                let proto = &r.prototype;
                format!(
                    "typedef {} ({} *{})({});",
                    proto.return_type,
                    proto.convention,
                    names.pointer(r.symbol.as_str()),
                    proto.params
                )
            }),
            protos: lines(resolved, |r| r.prototype.declaration.clone()),
        }
    }

    /// Block belonging to a region
    pub fn get(&self, key: RegionKey) -> &str {
        match key {
            RegionKey::GlDefs => &self.gldefs,
            RegionKey::Undefs => &self.undefs,
            RegionKey::Redefs => &self.redefs,
            RegionKey::ReverseDefs => &self.reversedefs,
            RegionKey::Typedefs => &self.typedefs,
            RegionKey::Protos => &self.protos,
        }
    }
}

struct Naming<'a> {
    alias_prefix: &'a str,
    pointer_suffix: &'a str,
}

impl<'a> Naming<'a> {
    fn new(config: &'a NamingConfig) -> Self {
        Self {
            alias_prefix: &config.alias_prefix,
            pointer_suffix: &config.pointer_suffix,
        }
    }

    fn alias(&self, raw: &str) -> String {
        format!("{}{}", self.alias_prefix, raw)
    }

    /// Pointer type name, shared by the macro table and the typedefs
    fn pointer(&self, raw: &str) -> String {
        format!("{}{}{}", self.alias_prefix, raw, self.pointer_suffix)
    }
}

fn lines<F>(resolved: &[ResolvedSymbol], f: F) -> String
where
    F: Fn(&ResolvedSymbol) -> String,
{
    resolved.iter().map(f).collect::<Vec<_>>().join("\n")
}
