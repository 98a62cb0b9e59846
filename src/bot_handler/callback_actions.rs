use serde::{Deserialize, Serialize};

use crate::storage::RecordKind;

/// Actions encoded into inline keyboard buttons. Telegram limits callback
/// data to 64 bytes, hence the one or two letter tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallbackAction {
    #[serde(rename = "p")]
    GoToPage(RecordKind, usize),
    #[serde(rename = "n")]
    NextPage(RecordKind),
    #[serde(rename = "b")]
    PrevPage(RecordKind),
    #[serde(rename = "f")]
    FirstPage(RecordKind),
    #[serde(rename = "l")]
    LastPage(RecordKind),
    #[serde(rename = "v")]
    ViewRecord(RecordKind, i64),
    #[serde(rename = "r")]
    RemoveRecord(RecordKind, i64),
    #[serde(rename = "bl")]
    BackToList(RecordKind),
    #[serde(rename = "s")]
    Search(RecordKind),
    #[serde(rename = "cs")]
    ClearSearch(RecordKind),
    #[serde(rename = "cp")]
    CommissionsPage(usize),
    /// Inert buttons: current page, ellipsis, disabled navigation.
    Noop,
    // Command keyboard actions, should be handled as commands:
    CmdHelp,
    CmdApplications,
    CmdCustomers,
    CmdAddCustomer,
    CmdAddApplication,
    CmdCommissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_fit_callback_data_limit() {
        let actions = [
            CallbackAction::GoToPage(RecordKind::Applications, usize::MAX),
            CallbackAction::ViewRecord(RecordKind::Customers, i64::MIN),
            CallbackAction::RemoveRecord(RecordKind::Customers, i64::MAX),
            CallbackAction::CommissionsPage(usize::MAX),
            CallbackAction::CmdAddApplication,
        ];

        for action in actions {
            let data = serde_json::to_string(&action).unwrap();
            assert!(data.len() <= 64, "{data} is too long");
        }
    }

    #[test]
    fn test_compact_encoding() {
        assert_eq!(
            serde_json::to_string(&CallbackAction::GoToPage(RecordKind::Customers, 3)).unwrap(),
            r#"{"p":["c",3]}"#
        );
        assert_eq!(serde_json::to_string(&CallbackAction::Noop).unwrap(), r#""noop""#);
        assert_eq!(
            serde_json::from_str::<CallbackAction>(r#"{"v":["a",12]}"#).unwrap(),
            CallbackAction::ViewRecord(RecordKind::Applications, 12)
        );
    }
}
