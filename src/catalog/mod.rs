//! Report catalog.
//!
//! The catalog is the only source of view names the reporting layer will
//! ever put into query text. It is built once at startup, validated, and
//! shared read-only afterwards.

mod builtin;

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::Provider;
use crate::model::Role;

/// Plain SQL identifier: letters, digits and underscores, not starting
/// with a digit.
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Returns true if `s` can be used verbatim as a SQL identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Error type for catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate report id: {0}")]
    DuplicateId(String),

    #[error("Report {report} has no allowed roles")]
    NoRoles { report: String },

    #[error("Report {report}: {ident:?} is not a valid SQL identifier")]
    InvalidIdentifier { report: String, ident: String },
}

/// Per-provider view names for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderViews {
    /// View queried when the relational provider is active.
    pub mysql: Option<String>,
    /// Collection/pipeline name for the document provider.
    pub mongo: Option<String>,
}

/// A queryable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDefinition {
    pub id: String,
    pub title: String,
    pub allowed_roles: Vec<Role>,
    pub views: ProviderViews,
    /// Filter keys the report accepts, in display order.
    pub filters: Vec<String>,
}

impl ReportDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            allowed_roles: Vec::new(),
            views: ProviderViews::default(),
            filters: Vec::new(),
        }
    }

    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.allowed_roles = roles.to_vec();
        self
    }

    pub fn mysql_view(mut self, view: impl Into<String>) -> Self {
        self.views.mysql = Some(view.into());
        self
    }

    pub fn mongo_view(mut self, view: impl Into<String>) -> Self {
        self.views.mongo = Some(view.into());
        self
    }

    pub fn filters(mut self, keys: &[&str]) -> Self {
        self.filters = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Admin passes every check; anyone else must be listed.
    pub fn permits(&self, role: Role) -> bool {
        role.is_admin() || self.allowed_roles.contains(&role)
    }

    /// View to query for `provider`, if the report has one.
    pub fn view_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::MySql => self.views.mysql.as_deref(),
            Provider::Mongo => self.views.mongo.as_deref(),
        }
    }

    /// Public description of the report, without view names.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            roles: self.allowed_roles.clone(),
            filters: self.filters.clone(),
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.allowed_roles.is_empty() {
            return Err(CatalogError::NoRoles {
                report: self.id.clone(),
            });
        }
        let views = [self.views.mysql.as_deref(), self.views.mongo.as_deref()];
        let idents = views
            .into_iter()
            .flatten()
            .chain(self.filters.iter().map(String::as_str));
        for ident in idents {
            if !is_identifier(ident) {
                return Err(CatalogError::InvalidIdentifier {
                    report: self.id.clone(),
                    ident: ident.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The catalog entry as exposed to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub id: String,
    pub title: String,
    pub roles: Vec<Role>,
    pub filters: Vec<String>,
}

/// Immutable, ordered set of report definitions.
#[derive(Debug, Clone)]
pub struct ReportCatalog {
    reports: Vec<ReportDefinition>,
}

impl ReportCatalog {
    /// Build a catalog, rejecting duplicate ids and any view name or filter
    /// key that is not a plain identifier.
    pub fn new(reports: Vec<ReportDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for report in &reports {
            if !seen.insert(report.id.as_str()) {
                return Err(CatalogError::DuplicateId(report.id.clone()));
            }
            report.validate()?;
        }
        Ok(Self { reports })
    }

    /// The condo-management reports shipped with the service.
    pub fn builtin() -> Self {
        Self {
            reports: builtin::reports(),
        }
    }

    /// Reports visible to `role`, in declaration order.
    pub fn list_for_role(&self, role: Role) -> Vec<&ReportDefinition> {
        self.reports.iter().filter(|r| r.permits(role)).collect()
    }

    pub fn lookup(&self, id: &str) -> Option<&ReportDefinition> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportDefinition> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Default for ReportCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
