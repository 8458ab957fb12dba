//! Static permission catalog and default role templates
//!
//! Permission strings are matched verbatim by policies. Entries may be
//! added, never renamed.

use super::types::{Permission, Role};

pub const ORG_CREATE: &str = "ORG.CREATE";
pub const ORG_VIEW: &str = "ORG.VIEW";
pub const ORG_UPDATE: &str = "ORG.UPDATE";
pub const ORG_DELETE: &str = "ORG.DELETE";

pub const INVOICE_CREATE: &str = "INVOICE.CREATE";
pub const INVOICE_VIEW: &str = "INVOICE.VIEW";
pub const INVOICE_UPDATE: &str = "INVOICE.UPDATE";
pub const INVOICE_DELETE: &str = "INVOICE.DELETE";
pub const INVOICE_IMPORT: &str = "INVOICE.IMPORT";

pub const PAYROLL_CREATE: &str = "PAYROLL.CREATE";
pub const PAYROLL_VIEW: &str = "PAYROLL.VIEW";
pub const PAYROLL_UPDATE: &str = "PAYROLL.UPDATE";
pub const PAYROLL_DELETE: &str = "PAYROLL.DELETE";

pub const BALANCE_SHEET_CREATE: &str = "BALANCESHEET.CREATE";
pub const BALANCE_SHEET_VIEW: &str = "BALANCESHEET.VIEW";
pub const BALANCE_SHEET_EXPORT: &str = "BALANCESHEET.EXPORT";

pub const DOCUMENT_UPLOAD: &str = "DOCUMENT.UPLOAD";
pub const DOCUMENT_VIEW: &str = "DOCUMENT.VIEW";
pub const DOCUMENT_DELETE: &str = "DOCUMENT.DELETE";

pub const USER_CREATE: &str = "USER.CREATE";
pub const USER_VIEW: &str = "USER.VIEW";
pub const USER_UPDATE: &str = "USER.UPDATE";
pub const USER_DELETE: &str = "USER.DELETE";
pub const USER_LOCK: &str = "USER.LOCK";

pub const ROLE_CREATE: &str = "ROLE.CREATE";
pub const ROLE_VIEW: &str = "ROLE.VIEW";
pub const ROLE_UPDATE: &str = "ROLE.UPDATE";
pub const ROLE_ASSIGN: &str = "ROLE.ASSIGN";

pub const LOG_VIEW: &str = "LOG.VIEW";

/// Every permission known to the application, with its description
pub const PERMISSIONS: &[(&str, &str)] = &[
    (ORG_CREATE, "Create organizations"),
    (ORG_VIEW, "View organizations"),
    (ORG_UPDATE, "Update organizations"),
    (ORG_DELETE, "Delete organizations"),
    (INVOICE_CREATE, "Create invoices"),
    (INVOICE_VIEW, "View invoices"),
    (INVOICE_UPDATE, "Update invoices"),
    (INVOICE_DELETE, "Delete invoices"),
    (INVOICE_IMPORT, "Import invoices from external documents"),
    (PAYROLL_CREATE, "Create payroll runs"),
    (PAYROLL_VIEW, "View payroll"),
    (PAYROLL_UPDATE, "Update payroll"),
    (PAYROLL_DELETE, "Delete payroll runs"),
    (BALANCE_SHEET_CREATE, "Create balance sheets"),
    (BALANCE_SHEET_VIEW, "View balance sheets"),
    (BALANCE_SHEET_EXPORT, "Export balance sheets"),
    (DOCUMENT_UPLOAD, "Upload documents"),
    (DOCUMENT_VIEW, "View documents"),
    (DOCUMENT_DELETE, "Delete documents"),
    (USER_CREATE, "Create users"),
    (USER_VIEW, "View users"),
    (USER_UPDATE, "Update users"),
    (USER_DELETE, "Delete users"),
    (USER_LOCK, "Lock and unlock users"),
    (ROLE_CREATE, "Create roles"),
    (ROLE_VIEW, "View roles"),
    (ROLE_UPDATE, "Change role permissions"),
    (ROLE_ASSIGN, "Assign roles to users"),
    (LOG_VIEW, "View audit logs"),
];

pub const ADMIN_ROLE: &str = "Admin";
pub const ACCOUNTANT_ROLE: &str = "Accountant";
pub const VIEWER_ROLE: &str = "Viewer";

/// Whether `permission` is part of the compiled catalog
pub fn is_known_permission(permission: &str) -> bool {
    PERMISSIONS.iter().any(|(name, _)| *name == permission)
}

/// Catalog entries as owned permission definitions
pub fn permissions() -> Vec<Permission> {
    PERMISSIONS
        .iter()
        .map(|(name, description)| Permission {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Default roles created on first start
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new(ADMIN_ROLE)
            .with_description("Full access to every back-office feature")
            .with_permissions(PERMISSIONS.iter().map(|(name, _)| *name)),
        Role::new(ACCOUNTANT_ROLE)
            .with_description("Bookkeeping: invoices, payroll and balance sheets")
            .with_permissions([
                ORG_VIEW,
                INVOICE_CREATE,
                INVOICE_VIEW,
                INVOICE_UPDATE,
                INVOICE_IMPORT,
                PAYROLL_CREATE,
                PAYROLL_VIEW,
                PAYROLL_UPDATE,
                BALANCE_SHEET_CREATE,
                BALANCE_SHEET_VIEW,
                BALANCE_SHEET_EXPORT,
                DOCUMENT_UPLOAD,
                DOCUMENT_VIEW,
            ]),
        Role::new(VIEWER_ROLE)
            .with_description("Read-only access")
            .with_permissions([
                ORG_VIEW,
                INVOICE_VIEW,
                PAYROLL_VIEW,
                BALANCE_SHEET_VIEW,
                DOCUMENT_VIEW,
            ]),
    ]
}
