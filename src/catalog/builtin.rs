//! Reports shipped with the service.
//!
//! Every report is backed by a MySQL view of the same shape. None has a
//! document-store counterpart yet.

use super::ReportDefinition;
use crate::model::Role;

pub(super) fn reports() -> Vec<ReportDefinition> {
    vec![
        // Manager-facing operational detail
        ReportDefinition::new("manager_open_projects_detailed", "Open Projects (Detailed)")
            .roles(&[Role::Manager, Role::Admin])
            .mysql_view("vw_manager_open_projects_detailed")
            .filters(&["property_id"]),
        ReportDefinition::new("manager_vendor_quotes_detail", "Vendor Quotes (Detail)")
            .roles(&[Role::Manager, Role::Admin])
            .mysql_view("vw_manager_vendor_quotes_detail")
            .filters(&["project_id", "property_id"]),
        ReportDefinition::new("manager_property_summary", "Property Summary (YTD)")
            .roles(&[Role::Manager, Role::Admin])
            .mysql_view("vw_manager_property_summary")
            .filters(&["property_id"]),
        // Board-facing
        ReportDefinition::new("board_pending_approvals_summary", "Pending Approvals Summary")
            .roles(&[Role::Board, Role::Admin])
            .mysql_view("vw_board_pending_approvals_summary")
            .filters(&["property_id"]),
        ReportDefinition::new(
            "board_member_pending_approvals",
            "Pending Approvals by Board Member",
        )
        .roles(&[Role::Board, Role::Admin])
        .mysql_view("vw_board_member_pending_approvals")
        .filters(&["board_member_id", "property_id"]),
        ReportDefinition::new("board_capital_spend_summary_ytd", "Capital Spend Summary (YTD)")
            .roles(&[Role::Board, Role::Admin])
            .mysql_view("vw_board_capital_spend_summary_ytd")
            .filters(&["property_id"]),
    ]
}
