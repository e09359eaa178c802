//! Display implementations for the resolved API, for debugging and snapshots.

use basalt_core::type_system::{UnionMember, UserType};
use std::fmt;

use crate::{Api, ApiNamespace, ApiRoute};

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "api {}", self.version)?;
        for namespace in &self.namespaces {
            write!(f, "{}", NamespaceDisplay { api: self, namespace })?;
        }
        Ok(())
    }
}

struct NamespaceDisplay<'a> {
    api: &'a Api,
    namespace: &'a ApiNamespace,
}

impl fmt::Display for NamespaceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = &self.api.registry;
        let namespace = self.namespace;
        writeln!(f, "\nnamespace {}", namespace.name)?;

        let imports = namespace.get_imported_namespaces(false, true);
        if !imports.is_empty() {
            writeln!(f, "  import {}", imports.join(", "))?;
        }

        for id in namespace.linearize_aliases(registry) {
            let alias = registry.alias(id);
            writeln!(
                f,
                "  alias {} = {}",
                alias.name,
                registry.type_name(&alias.data_type)
            )?;
        }

        for id in namespace.linearize_data_types(registry) {
            let Some(user_type) = registry.get(id) else {
                continue;
            };
            write!(f, "  {} {}", user_type.kind_name(), user_type.name())?;
            if let Some(parent) = user_type.parent() {
                write!(f, " extends {}", registry.name(parent))?;
            }
            writeln!(f)?;
            match user_type {
                UserType::Struct(s) => {
                    if !s.coverage.is_empty() {
                        let names: Vec<_> = s.coverage.iter().map(|c| registry.name(*c)).collect();
                        writeln!(f, "    coverage {}", names.join(" | "))?;
                    }
                    for field in &s.fields {
                        write!(
                            f,
                            "    {} {}",
                            field.name,
                            registry.type_name(&field.data_type)
                        )?;
                        if let Some(default) = &field.default {
                            write!(f, " = {default}")?;
                        }
                        writeln!(f)?;
                    }
                }
                UserType::Union(u) => {
                    for member in &u.fields {
                        match member {
                            UnionMember::Field(field) => writeln!(
                                f,
                                "    {} {}",
                                field.name,
                                registry.type_name(&field.data_type)
                            )?,
                            UnionMember::Symbol(symbol) if symbol.catch_all => {
                                writeln!(f, "    {}*", symbol.name)?;
                            }
                            UnionMember::Symbol(symbol) => writeln!(f, "    {}", symbol.name)?,
                        }
                    }
                }
            }
        }

        for route in &namespace.routes {
            write!(f, "{}", RouteDisplay { api: self.api, route })?;
        }
        Ok(())
    }
}

struct RouteDisplay<'a> {
    api: &'a Api,
    route: &'a ApiRoute,
}

impl fmt::Display for RouteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = &self.api.registry;
        let route = self.route;
        write!(
            f,
            "  route {} ({}, {}, {})",
            route.key(),
            registry.type_name(&route.arg_type),
            registry.type_name(&route.result_type),
            registry.type_name(&route.error_type)
        )?;
        if let Some(deprecation) = &route.deprecated {
            match &deprecation.by {
                Some(by) => write!(f, " deprecated by {by}")?,
                None => write!(f, " deprecated")?,
            }
        }
        writeln!(f)
    }
}
