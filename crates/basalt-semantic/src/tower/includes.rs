//! Include expansion.

use super::Tower;
use basalt_ast::{Declaration, IncludeDecl, SourceFile};
use basalt_core::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// Include bookkeeping for one namespace.
#[derive(Default)]
pub(crate) struct Expansion<'a> {
    /// Headers currently being expanded, outermost first.
    stack: Vec<&'a str>,
    /// Headers already expanded into this namespace.
    done: HashSet<&'a str>,
}

impl<'a> Tower<'a> {
    /// Appends the declarations of `file` after its namespace declaration,
    /// with every include replaced by the included header's declarations.
    /// A header already expanded into the namespace is not expanded again.
    pub(crate) fn expand_file(
        &self,
        file: &'a SourceFile,
        expansion: &mut Expansion<'a>,
        out: &mut Vec<&'a Declaration>,
    ) -> Result<()> {
        for declaration in file.declarations.iter().skip(1) {
            self.expand(declaration, expansion, out)?;
        }
        Ok(())
    }

    fn expand(
        &self,
        declaration: &'a Declaration,
        expansion: &mut Expansion<'a>,
        out: &mut Vec<&'a Declaration>,
    ) -> Result<()> {
        match declaration {
            Declaration::Include(include) => self.expand_include(include, expansion, out),
            _ => {
                out.push(declaration);
                Ok(())
            }
        }
    }

    fn expand_include(
        &self,
        include: &'a IncludeDecl,
        expansion: &mut Expansion<'a>,
        out: &mut Vec<&'a Declaration>,
    ) -> Result<()> {
        let target = include.target.as_str();
        let Some(header) = self.headers.get(target).copied() else {
            return Err(Error::invalid_spec(
                format!("Included header '{target}' does not exist"),
                include.span,
            ));
        };
        let key = header.path.as_str();
        if expansion.stack.contains(&key) {
            let mut cycle = expansion.stack.clone();
            cycle.push(key);
            return Err(Error::invalid_spec(
                format!("Cyclic include: {}", cycle.join(" -> ")),
                include.span,
            ));
        }
        if expansion.done.contains(key) {
            debug!(header = target, "header already included");
            return Ok(());
        }
        if expansion.stack.len() >= self.config.max_include_depth {
            return Err(Error::invalid_spec(
                format!(
                    "Include of '{target}' exceeds the maximum include depth of {}",
                    self.config.max_include_depth
                ),
                include.span,
            ));
        }

        debug!(header = target, depth = expansion.stack.len() + 1, "expanding include");
        expansion.stack.push(key);
        for declaration in &header.declarations {
            match declaration {
                Declaration::Alias(_) | Declaration::Type(_) | Declaration::Include(_) => {
                    self.expand(declaration, expansion, out)?;
                }
                other => {
                    return Err(Error::invalid_spec(
                        format!(
                            "Header '{target}' may only contain aliases, type definitions \
                             and includes, found {} '{}'",
                            other.kind_name(),
                            other.name()
                        ),
                        other.span(),
                    ));
                }
            }
        }
        expansion.stack.pop();
        expansion.done.insert(key);
        Ok(())
    }
}
