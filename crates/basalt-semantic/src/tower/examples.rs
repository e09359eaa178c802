//! Example attachment.

use super::{Scope, Tower};
use basalt_core::Result;
use basalt_core::type_system::Example;
use tracing::trace;

impl<'a> Tower<'a> {
    /// Validates and stores every example of the namespace, then
    /// materializes each once so missing nested examples surface here.
    pub(crate) fn attach_examples(&mut self, scope: &mut Scope<'a>) -> Result<()> {
        let pending = std::mem::take(&mut scope.pending_examples);
        for &(id, examples) in &pending {
            for decl in examples {
                let mut example = Example::new(&decl.label, decl.value.clone());
                example.doc.clone_from(&decl.doc);
                self.registry.add_example(id, example)?;
            }
        }

        for &(id, examples) in &pending {
            for decl in examples {
                self.registry.get_example(id, &decl.label)?;
                trace!(
                    namespace = scope.name(),
                    data_type = self.registry.name(id),
                    label = %decl.label,
                    "attached example"
                );
            }
        }
        Ok(())
    }
}
