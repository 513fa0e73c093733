use std::time::Duration;

use mailfold_core::{update, AppState, CandidateFile, Effect, Msg, NoticeKind};

fn armed_timers(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ArmNoticeTimer { token, .. } => Some(*token),
            _ => None,
        })
        .collect()
}

#[test]
fn quick_successive_notices_leave_one_message_and_one_timer() {
    let state = AppState::new().with_notice_duration(Duration::from_secs(5));
    let (state, first) = update(state, Msg::FilePicked(None));
    let (state, second) = update(
        state,
        Msg::FileUnreadable {
            name: "a.eml".into(),
            reason: "permission denied".into(),
        },
    );

    assert_eq!(armed_timers(&first), vec![1]);
    assert_eq!(armed_timers(&second), vec![2]);
    assert!(second.contains(&Effect::CancelNoticeTimer { token: 1 }));

    let notice = state.view().notice.expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("permission denied"));

    // The cancelled timer firing late must not hide the newer message.
    let (state, _) = update(state, Msg::NoticeExpired(1));
    assert!(state.view().notice.is_some());

    let (state, _) = update(state, Msg::NoticeExpired(2));
    assert!(state.view().notice.is_none());
}

#[test]
fn unreadable_drop_ends_the_drag_hover() {
    let (state, _) = update(AppState::new(), Msg::DragEntered);
    assert!(state.view().drop_zone.dragging);

    let (state, _) = update(
        state,
        Msg::FileUnreadable {
            name: "first.eml".into(),
            reason: "not found".into(),
        },
    );
    let view = state.view();
    assert!(!view.drop_zone.dragging);
    assert!(view.notice.expect("notice").message.contains("first.eml"));
}

#[test]
fn configured_duration_is_used_for_timers() {
    let state = AppState::new()
        .with_project_name("acme")
        .with_notice_duration(Duration::from_millis(750));
    let (_, effects) = update(
        state,
        Msg::FilePicked(Some(CandidateFile::new("a.txt", Vec::new()))),
    );
    assert!(effects.contains(&Effect::ArmNoticeTimer {
        token: 1,
        after: Duration::from_millis(750)
    }));
}

#[test]
fn dismiss_hides_and_cancels() {
    let (state, _) = update(AppState::new(), Msg::FilePicked(None));
    let (mut state, effects) = update(state, Msg::NoticeDismissed);
    assert_eq!(effects, vec![Effect::CancelNoticeTimer { token: 1 }]);
    assert!(state.view().notice.is_none());
    assert!(state.consume_dirty());
}
