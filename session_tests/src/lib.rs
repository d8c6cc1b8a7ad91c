// Test-only demo world for end-to-end session tests.
//
// Builds a complete authored configuration — tree blocks, stepping-stone
// paths, and the full cast of signs (decorative, info-only, required
// questions, a substitutable pair, and the guide-naming sign) — using the
// same store API an outer application layer would call. The only
// test-specific code here is the convenience command builders; everything
// else exercises the same code paths as a live session.
//
// See also: `tests/full_session.rs` for the end-to-end scenarios.

use waymeadow_sim::command::{SessionAction, SessionCommand};
use waymeadow_sim::geometry::Path;
use waymeadow_sim::input::Direction;
use waymeadow_sim::scatter::TreeBlock;
use waymeadow_sim::session::SessionState;
use waymeadow_sim::sign::{CompletionRule, ResponseEffect, Sign, SignKind};
use waymeadow_sim::types::SignId;

/// A fully-configured session plus the ids of its notable signs.
pub struct DemoWorld {
    pub session: SessionState,
    /// Required question, graded.
    pub intentions: SignId,
    /// Required question, graded.
    pub timeline: SignId,
    /// Substitutable pair, group 1.
    pub have_agent: SignId,
    /// Substitutable pair, group 1.
    pub find_agent: SignId,
    /// Excluded; renames the guide.
    pub guide: SignId,
    /// Decorative welcome sign.
    pub welcome: SignId,
    /// Interactive info-only sign (no response box).
    pub map_hint: SignId,
}

pub fn grade_intentions(response: &str) -> String {
    format!("Good to know what brings you here: {}.", response.trim())
}

pub fn grade_timeline(response: &str) -> String {
    format!("We'll pace the tour for \"{}\".", response.trim())
}

pub fn grade_agent(_: &str) -> String {
    "Having someone in your corner helps.".to_string()
}

fn question(
    title: &str,
    text: &str,
    top: f64,
    left: f64,
    grading: fn(&str) -> String,
    rule: CompletionRule,
) -> Sign {
    Sign {
        text: text.into(),
        font_size: 14.0,
        top,
        left,
        kind: SignKind::Interactive {
            additional_info: Some("Click again to answer.".into()),
            has_response_box: true,
            grading: Some(grading),
            title: Some(title.into()),
            rule,
            effect: ResponseEffect::None,
        },
    }
}

/// Build the demo meadow: scattered groves, two stepping-stone trails, and
/// seven signs along them.
pub fn demo_world() -> DemoWorld {
    let mut session = SessionState::default();

    session.add_path(Path::new(900.0, 50.0, 600.0, 100.0, 0.0));
    session.add_path(Path::new(500.0, 40.0, 600.0, 1000.0, 60.0));

    session.add_tree_block(TreeBlock::new(400.0, 700.0, 3.0, 400.0, 80.0));
    session.add_tree_block(TreeBlock::new(350.0, 500.0, 4.0, 450.0, 900.0));
    session.add_tree_block(TreeBlock::new(250.0, 1200.0, 2.0, 100.0, 200.0));

    let welcome = session.add_text_box(Sign::decorative(
        "Welcome to the meadow.\nFollow the stones.",
        18.0,
        560.0,
        120.0,
    ));
    let map_hint = session.add_text_box(Sign {
        text: "The trails split ahead.".into(),
        font_size: 12.0,
        top: 580.0,
        left: 500.0,
        kind: SignKind::Interactive {
            additional_info: Some("The east trail is steeper but shorter.".into()),
            has_response_box: false,
            grading: None,
            title: None,
            rule: CompletionRule::Excluded,
            effect: ResponseEffect::None,
        },
    });
    let intentions = session.add_text_box(question(
        "Your intentions",
        "What brings you out here?",
        540.0,
        350.0,
        grade_intentions,
        CompletionRule::Required,
    ));
    let timeline = session.add_text_box(question(
        "Your timeline",
        "When do you hope to arrive?",
        540.0,
        700.0,
        grade_timeline,
        CompletionRule::Required,
    ));
    let have_agent = session.add_text_box(question(
        "Already have an agent",
        "Travelling with a guide already?",
        620.0,
        1050.0,
        grade_agent,
        CompletionRule::AlternativeGroup(1),
    ));
    let find_agent = session.add_text_box(question(
        "Find an agent",
        "Want us to pair you with a guide?",
        700.0,
        1150.0,
        grade_agent,
        CompletionRule::AlternativeGroup(1),
    ));
    let guide = session.add_text_box(Sign {
        text: "Our guide needs a name!".into(),
        font_size: 14.0,
        top: 660.0,
        left: 250.0,
        kind: SignKind::Interactive {
            additional_info: Some("Anything you like.".into()),
            has_response_box: true,
            grading: None,
            title: Some("Name the guide".into()),
            rule: CompletionRule::Excluded,
            effect: ResponseEffect::SetGuideName,
        },
    });

    DemoWorld {
        session,
        intentions,
        timeline,
        have_agent,
        find_agent,
        guide,
        welcome,
        map_hint,
    }
}

/// A key-press command at a tick.
pub fn press(tick: u64, direction: Direction) -> SessionCommand {
    SessionCommand {
        tick,
        action: SessionAction::KeyPressed { direction },
    }
}

/// A key-release command at a tick.
pub fn release(tick: u64, direction: Direction) -> SessionCommand {
    SessionCommand {
        tick,
        action: SessionAction::KeyReleased { direction },
    }
}

/// An open-sign command at a tick.
pub fn open(tick: u64, sign: SignId) -> SessionCommand {
    SessionCommand {
        tick,
        action: SessionAction::OpenSign { sign },
    }
}

/// A submit-response command at a tick.
pub fn submit(tick: u64, sign: SignId, text: &str) -> SessionCommand {
    SessionCommand {
        tick,
        action: SessionAction::SubmitResponse {
            sign,
            text: text.into(),
        },
    }
}
