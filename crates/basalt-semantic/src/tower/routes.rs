//! Routes and their deprecation links.

use super::{Scope, Tower};
use basalt_ast::RouteDecl;
use basalt_core::{Error, Result};
use basalt_ir::{ApiRoute, Deprecation, RouteKey};
use tracing::{trace, warn};

impl<'a> Tower<'a> {
    pub(crate) fn resolve_route(&mut self, scope: &mut Scope<'a>, decl: &RouteDecl) -> Result<()> {
        let key = RouteKey::new(decl.name.clone(), decl.version);
        if decl.version == 0 {
            return Err(Error::invalid_spec(
                format!("Route '{}' has version 0; versions start at 1", decl.name),
                decl.span,
            ));
        }
        if scope.namespace.route_by_key(&key).is_some() {
            return Err(Error::invalid_spec(
                format!(
                    "Route '{key}' is already defined in namespace '{}'",
                    scope.name()
                ),
                decl.span,
            ));
        }

        let arg_type = self.resolve_type_ref(scope, &decl.arg)?;
        let result_type = self.resolve_type_ref(scope, &decl.result)?;
        let error_type = self.resolve_type_ref(scope, &decl.error)?;

        let mut route = ApiRoute::new(&decl.name, arg_type, result_type, error_type);
        route.version = decl.version;
        route.doc.clone_from(&decl.doc);
        route.attrs.clone_from(&decl.attrs);
        route.span = decl.span;
        if let Some(deprecation) = &decl.deprecated {
            let by = deprecation
                .by
                .as_ref()
                .map(|by| RouteKey::new(by.name.clone(), by.version));
            if let Some(by) = &by {
                scope
                    .pending_deprecations
                    .push((key.clone(), by.clone(), decl.span));
            }
            route.deprecated = Some(Deprecation { by });
        }

        trace!(namespace = scope.name(), route = %key, "resolved route");
        scope.namespace.add_route(route);
        Ok(())
    }

    /// Checks that every `deprecated by` target is a route of the same namespace.
    pub(crate) fn resolve_deprecations(&self, scope: &Scope<'a>) -> Result<()> {
        for (route, by, span) in &scope.pending_deprecations {
            let Some(replacement) = scope.namespace.route_by_key(by) else {
                return Err(Error::invalid_spec(
                    format!(
                        "Route '{route}' is deprecated by '{by}', which is not a route of namespace '{}'",
                        scope.name()
                    ),
                    *span,
                ));
            };
            if replacement.key() == *route {
                return Err(Error::invalid_spec(
                    format!("Route '{route}' cannot be deprecated by itself"),
                    *span,
                ));
            }
            if replacement.is_deprecated() {
                warn!(
                    namespace = scope.name(),
                    route = %route,
                    replacement = %by,
                    "route is deprecated in favor of a route that is itself deprecated"
                );
            }
        }
        Ok(())
    }
}
