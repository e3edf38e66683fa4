use super::*;
use crate::{catalog::model::ParamSpec, sync::store::MemoryStore};

struct FailingStore {
    attempts: usize,
}

impl SessionStore for FailingStore {
    fn load(&mut self) -> FxResult<Option<Session>> {
        Err(FxError::persistence("disk on fire"))
    }

    fn save(&mut self, _session: &Session) -> FxResult<()> {
        self.attempts += 1;
        Err(FxError::persistence("disk on fire"))
    }
}

#[derive(Default)]
struct RecordingSink {
    seen: Vec<(String, ParamValues, String)>,
}

impl PreviewSink for RecordingSink {
    fn present(&mut self, request: &PreviewRequest<'_>) {
        self.seen.push((
            request.text.to_owned(),
            request.params.clone(),
            request.binding.as_str().to_owned(),
        ));
    }
}

fn open(reg: &Registry) -> Controller<'_, MemoryStore> {
    Controller::open(reg, MemoryStore::new())
}

#[test]
fn fresh_session_uses_default_effect() {
    let reg = Registry::builtin().unwrap();
    let ctl = open(&reg);
    assert_eq!(ctl.session().selected_effect, "No Effect");
    assert!(ctl.session().params.is_empty());
    assert_eq!(ctl.mode(), EditMode::FormAuthoritative);
    assert!(ctl.session().source_text.contains("function NoEffect"));
}

#[test]
fn param_edit_rerenders_source() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    ctl.set_param("duration", ParamValue::Number(2.5)).unwrap();
    assert!(ctl.session().source_text.contains("duration: 2.5"));
    assert_eq!(ctl.store().session(), Some(ctl.session()));
}

#[test]
fn selecting_resets_to_new_schema_defaults() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Rotator").unwrap();
    ctl.set_param("duration", ParamValue::Number(7.0)).unwrap();

    ctl.select_effect("Fader").unwrap();
    assert_eq!(
        ctl.session().params,
        reg.lookup("Fader").unwrap().schema_defaults()
    );

    ctl.select_effect("Rotator").unwrap();
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(2.0));
}

#[test]
fn unknown_effect_is_rejected_without_changes() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    let before = ctl.session().clone();

    let err = ctl.select_effect("Sparkle").unwrap_err();
    assert!(matches!(err, FxError::UnknownEffect(_)));
    assert_eq!(ctl.session(), &before);
}

#[test]
fn unknown_and_mistyped_params_are_rejected() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    assert!(matches!(
        ctl.set_param("color", ParamValue::from("#fff")),
        Err(FxError::UnknownParam { .. })
    ));
    assert!(matches!(
        ctl.set_param("duration", ParamValue::from("slow")),
        Err(FxError::Validation(_))
    ));
    assert!(ctl.set_param_str("duration", "abc").is_err());
    ctl.set_param_str("duration", "3.5").unwrap();
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(3.5));
}

#[test]
fn source_edits_are_kept_verbatim_until_leaving() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();

    ctl.edit_source("transition={{ duration: 4");
    assert_eq!(ctl.mode(), EditMode::TextAuthoritative);
    assert_eq!(ctl.session().source_text, "transition={{ duration: 4");
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(1.0));

    ctl.edit_source("transition={{ duration: 4 }}");
    let report = ctl.leave_text_view().unwrap();
    assert_eq!(report.effect, "Fader");
    assert_eq!(report.recovered, vec!["duration".to_owned()]);
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(4.0));
    assert_eq!(ctl.mode(), EditMode::FormAuthoritative);
    assert!(ctl.session().source_text.contains("export default function Fader"));
}

#[test]
fn text_view_round_trip_without_edits_keeps_values() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Neon Glowing Text").unwrap();
    ctl.set_param("glowColor", ParamValue::from("rgb(255, 0, 255)")).unwrap();
    ctl.set_param("color", ParamValue::from("hsl(300, 100%, 50%)")).unwrap();
    ctl.set_param("glowStrength", ParamValue::Number(1.5)).unwrap();
    assert!(matches!(
        ctl.set_param("color", ParamValue::from("}x")),
        Err(FxError::Validation(_))
    ));
    let before = ctl.session().clone();

    ctl.enter_text_view();
    let report = ctl.leave_text_view().unwrap();
    assert!(!report.switched_effect);
    assert_eq!(report.recovered.len(), 4);
    assert_eq!(ctl.session(), &before);
}

#[test]
fn reconciliation_runs_once_per_exit() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    assert!(ctl.leave_text_view().is_none());

    ctl.enter_text_view();
    ctl.enter_text_view();
    assert!(ctl.leave_text_view().is_some());
    assert!(ctl.leave_text_view().is_none());
}

#[test]
fn recovered_entry_point_switches_effect() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();

    let neon = reg.lookup("Neon Glowing Text").unwrap();
    let mut values = neon.schema_defaults();
    values.insert("glowBlur".into(), ParamValue::Number(14.0));
    ctl.edit_source(render(&neon.template, &values));

    let report = ctl.leave_text_view().unwrap();
    assert!(report.switched_effect);
    assert_eq!(ctl.session().selected_effect, "Neon Glowing Text");
    assert_eq!(ctl.session().params, values);
}

#[test]
fn garbled_text_keeps_effect_and_falls_back_to_defaults() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Rotator").unwrap();
    ctl.set_param("duration", ParamValue::Number(9.0)).unwrap();

    ctl.edit_source("}}} nothing to see {{{");
    let report = ctl.leave_text_view().unwrap();
    assert!(!report.switched_effect);
    assert!(report.recovered.is_empty());
    assert_eq!(ctl.session().selected_effect, "Rotator");
    assert_eq!(
        ctl.session().params,
        reg.lookup("Rotator").unwrap().schema_defaults()
    );
}

#[test]
fn unresolved_entry_point_becomes_display_hint() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();

    ctl.edit_source("export default function Sparkle() {}\ntransition={{ duration: 3 }}");
    let report = ctl.leave_text_view().unwrap();
    assert_eq!(report.unresolved_entry_point.as_deref(), Some("Sparkle"));
    assert_eq!(ctl.display_hint(), Some("Sparkle"));
    assert_eq!(ctl.session().selected_effect, "Fader");
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(3.0));

    ctl.select_effect("Rotator").unwrap();
    assert_eq!(ctl.display_hint(), None);
}

#[test]
fn param_edit_in_text_view_reconciles_first() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    ctl.edit_source("export default function Rotator() {}\ntransition={{ duration: 6 }}");

    ctl.set_param("duration", ParamValue::Number(8.0)).unwrap();
    assert_eq!(ctl.mode(), EditMode::FormAuthoritative);
    assert_eq!(ctl.session().selected_effect, "Rotator");
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(8.0));
}

#[test]
fn selection_discards_pending_text_edits() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    ctl.edit_source("transition={{ duration: 4 }}");

    ctl.select_effect("Cascading").unwrap();
    assert_eq!(ctl.mode(), EditMode::FormAuthoritative);
    assert_eq!(ctl.session().params["stagger"], ParamValue::Number(0.1));
    assert!(ctl.session().source_text.contains("staggerChildren: 0.1"));
}

#[test]
fn merge_is_total_for_every_effect() {
    let reg = Registry::builtin().unwrap();
    let mut junk = ParamValues::new();
    junk.insert("duration".into(), ParamValue::from("fast"));
    junk.insert("nope".into(), ParamValue::Number(1.0));
    for def in reg.list() {
        for recovered in [ParamValues::new(), junk.clone()] {
            let merged = def.merge(&recovered);
            for p in &def.params {
                assert!(merged.contains_key(&p.name), "{} lost {}", def.name, p.name);
            }
            assert_eq!(merged.len(), def.params.len());
        }
    }
}

#[test]
fn persistence_failure_keeps_working_in_memory() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = Controller::open(&reg, FailingStore { attempts: 0 });
    ctl.select_effect("Fader").unwrap();
    ctl.set_param("duration", ParamValue::Number(2.0)).unwrap();
    ctl.set_text("hi");
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(2.0));
    assert_eq!(ctl.session().text, "hi");
    assert_eq!(ctl.into_store().attempts, 3);
}

#[test]
fn restores_persisted_session() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    ctl.set_param("duration", ParamValue::Number(2.5)).unwrap();
    ctl.set_text("hello");
    let store = ctl.into_store();

    let ctl = Controller::open(&reg, store);
    assert_eq!(ctl.session().selected_effect, "Fader");
    assert_eq!(ctl.session().text, "hello");
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(2.5));
    assert_eq!(ctl.mode(), EditMode::FormAuthoritative);
}

#[test]
fn restores_unsaved_code_edits_in_text_view() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Fader").unwrap();
    ctl.edit_source("transition={{ duration: 3 }}");
    let store = ctl.into_store();

    let mut ctl = Controller::open(&reg, store);
    assert_eq!(ctl.mode(), EditMode::TextAuthoritative);
    assert_eq!(ctl.session().source_text, "transition={{ duration: 3 }}");
    ctl.leave_text_view().unwrap();
    assert_eq!(ctl.session().params["duration"], ParamValue::Number(3.0));
}

#[test]
fn stale_persisted_effect_falls_back_to_default() {
    let reg = Registry::builtin().unwrap();
    let saved = Session {
        text: "keep me".into(),
        selected_effect: "Retired Effect".into(),
        params: ParamValues::new(),
        source_text: String::new(),
    };
    let ctl = Controller::open(&reg, MemoryStore::with_session(saved));
    assert_eq!(ctl.session().selected_effect, "No Effect");
    assert_eq!(ctl.session().text, "keep me");
}

#[test]
fn persisted_params_are_completed_with_defaults() {
    let reg = Registry::builtin().unwrap();
    let mut params = ParamValues::new();
    params.insert("glowBlur".into(), ParamValue::Number(3.0));
    let saved = Session {
        text: String::new(),
        selected_effect: "Neon Glowing Text".into(),
        params,
        source_text: String::new(),
    };
    let ctl = Controller::open(&reg, MemoryStore::with_session(saved));
    assert_eq!(ctl.session().params.len(), 4);
    assert_eq!(ctl.session().params["glowBlur"], ParamValue::Number(3.0));
    assert_eq!(ctl.session().params["color"], ParamValue::from("#ff00ff"));
}

#[test]
fn preview_receives_text_params_and_binding() {
    let reg = Registry::builtin().unwrap();
    let mut ctl = open(&reg);
    ctl.select_effect("Cascading").unwrap();
    ctl.set_text("wave");

    let mut sink = RecordingSink::default();
    ctl.present(&mut sink);
    assert_eq!(sink.seen.len(), 1);
    let (text, params, binding) = &sink.seen[0];
    assert_eq!(text, "wave");
    assert_eq!(params["stagger"], ParamValue::Number(0.1));
    assert_eq!(binding, "cascade");
}

#[test]
fn custom_catalog_effects_work_end_to_end() {
    let def = EffectDefinition::new(
        "Glow",
        "export function Glow() {}\nstyle={{ color: {color} }}",
        "glow",
    )
    .with_param(ParamSpec::color("color", "#00ffcc"));
    let reg = Registry::new(vec![def]).unwrap();
    let mut ctl = open(&reg);
    ctl.edit_source("export function Glow() {}\nstyle={{ color: '#123123' }}");
    ctl.leave_text_view().unwrap();
    assert_eq!(ctl.session().params["color"], ParamValue::from("#123123"));
    assert_eq!(
        ctl.session().source_text,
        "export function Glow() {}\nstyle={{ color: '#123123' }}"
    );
}
