//! Integration tests for PhaseSequencer

mod common;
use common::*;

use exhibit_sequencer::colors::{GREEN, RED, YELLOW};
use exhibit_sequencer::{
    DigitSelect, ExhibitContext, ExhibitProfile, ExhibitSequence, PanelText, Phase,
    PhaseSequencer, SequencerState, StripSelect, ValueSource,
};

fn context(log: &Log) -> ExhibitContext<MockBoard> {
    let profile = ExhibitProfile::watering();
    let devices = devices(
        log,
        profile.primary_strip.length(),
        profile.secondary_strip.length(),
    );
    let mut ctx = ExhibitContext::new(devices, MockDelay::new(log), rng(), profile);
    ctx.init().unwrap();
    ctx.reset_all().unwrap();
    log.clear();
    ctx
}

fn three_holds() -> ExhibitSequence<4> {
    ExhibitSequence::builder(ValueSource::Fixed(7))
        .phase(Phase::Hold {
            text: PanelText::new(["one", ""], RED),
            duration_ms: 10,
        })
        .unwrap()
        .phase(Phase::Hold {
            text: PanelText::new(["two", ""], YELLOW),
            duration_ms: 20,
        })
        .unwrap()
        .phase(Phase::Lamp {
            color: GREEN,
            duration_ms: 30,
        })
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn new_sequencer_is_idle() {
    let sequencer = PhaseSequencer::new(three_holds());
    assert_eq!(sequencer.state(), SequencerState::Idle);
    assert_eq!(sequencer.runs(), 0);
}

#[test]
fn run_executes_every_phase_then_resets() {
    let log = Log::new();
    let mut ctx = context(&log);
    let mut sequencer = PhaseSequencer::new(three_holds());

    let report = sequencer.run(&mut ctx, None).unwrap();

    assert_eq!(report.value, 7);
    assert_eq!(report.phases_run, 3);
    assert!(!report.cancelled);
    assert_eq!(sequencer.state(), SequencerState::Complete);

    let mut expected = panel_events(["one", ""], RED, false);
    expected.push(Event::Delay(10));
    expected.extend(panel_events(["two", ""], YELLOW, false));
    expected.push(Event::Delay(20));
    expected.push(Event::Lamp(GREEN));
    expected.push(Event::Delay(30));
    expected.extend(baseline_events(ctx.profile()));
    assert_eq!(log.events(), expected);
}

#[test]
fn cancel_between_phases_still_restores_baseline() {
    let log = Log::new();
    let mut ctx = context(&log);
    let baseline = snapshot(ctx.devices());
    let mut sequencer = PhaseSequencer::new(three_holds());

    let mut checks = 0;
    let report = sequencer
        .run_until(&mut ctx, None, || {
            checks += 1;
            checks > 1
        })
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.phases_run, 1);
    assert_eq!(snapshot(ctx.devices()), baseline);
    assert_eq!(sequencer.runs(), 1);
}

#[test]
fn reading_value_falls_back_without_sample() {
    let log = Log::new();
    let mut ctx = context(&log);
    let sequence = ExhibitSequence::<2>::builder(ValueSource::Reading { fallback: -1 })
        .phase(Phase::FadeIn {
            digit: DigitSelect::Both,
            levels: 1,
            interval_ms: 5,
        })
        .unwrap()
        .build()
        .unwrap();
    let mut sequencer = PhaseSequencer::new(sequence);

    assert_eq!(sequencer.run(&mut ctx, Some(31)).unwrap().value, 31);
    assert_eq!(sequencer.run(&mut ctx, None).unwrap().value, -1);
}

#[test]
fn fade_renders_each_level_on_both_digits() {
    let log = Log::new();
    let mut ctx = context(&log);
    let sequence = ExhibitSequence::<1>::builder(ValueSource::Fixed(33))
        .phase(Phase::FadeIn {
            digit: DigitSelect::Both,
            levels: 2,
            interval_ms: 50,
        })
        .unwrap()
        .build()
        .unwrap();

    PhaseSequencer::new(sequence).run(&mut ctx, None).unwrap();

    let renders: Vec<_> = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::DigitShow(..)))
        .collect();
    assert_eq!(
        renders,
        vec![
            Event::DigitShow(Which::Primary, 33, 0),
            Event::DigitShow(Which::Secondary, 33, 0),
            Event::DigitShow(Which::Primary, 33, 1),
            Event::DigitShow(Which::Secondary, 33, 1),
            Event::DigitShow(Which::Primary, 33, 2),
            Event::DigitShow(Which::Secondary, 33, 2),
        ]
    );
}

#[test]
fn long_panel_text_is_cut_to_sixteen_columns() {
    let log = Log::new();
    let mut ctx = context(&log);
    let sequence = ExhibitSequence::<1>::builder(ValueSource::Fixed(0))
        .phase(Phase::Hold {
            text: PanelText::new(["this line is far too long", "ok"], RED).blinking(),
            duration_ms: 0,
        })
        .unwrap()
        .build()
        .unwrap();

    PhaseSequencer::new(sequence).run(&mut ctx, None).unwrap();

    assert!(log.events().contains(&Event::Print("this line is far".to_string())));
    assert!(log.events().contains(&Event::Blink(true)));
}

#[test]
fn chase_uses_configured_strip_length() {
    let log = Log::new();
    let mut ctx = context(&log);
    let sequence = ExhibitSequence::<1>::builder(ValueSource::Fixed(0))
        .phase(Phase::Chase {
            strip: StripSelect::Secondary,
        })
        .unwrap()
        .build()
        .unwrap();

    PhaseSequencer::new(sequence).run(&mut ctx, None).unwrap();

    let expected_prefix = chase_events(Which::Secondary, 10, 400);
    assert_eq!(&log.events()[..expected_prefix.len()], expected_prefix.as_slice());
}
