//! A small library deprecating parts of its own API.

use once_cell::sync::Lazy;
use std::sync::Arc;
use sunset_deprecation::{
    CaptureSink, DeprecationConfig, DeprecationError, DeprecationRegistry, Emitter, KwArgs,
    SinkKind,
};

static SINK: Lazy<Arc<CaptureSink>> = Lazy::new(|| Arc::new(CaptureSink::new()));
static EMITTER: Lazy<Arc<Emitter>> = Lazy::new(|| {
    Arc::new(Emitter::new(
        Arc::new(DeprecationRegistry::new()),
        SINK.clone(),
    ))
});

mod legacy {
    use super::EMITTER;
    use once_cell::sync::Lazy;
    use sunset_deprecation::{
        DeprecatedMethod, DeprecatedType, KwArgs, RenamedArguments, Result, deprecate_arguments,
        deprecate_method,
    };

    pub struct Molecule {
        pub charge: i32,
    }

    type ChargeFn = fn(&Molecule, ()) -> i32;
    type BuildFn = fn((), KwArgs<i32>) -> Molecule;

    static TOTAL_CHARGE: Lazy<DeprecatedMethod<ChargeFn>> = Lazy::new(|| {
        deprecate_method("0.4.0", DeprecatedType::Method, "charge", None, 2)
            .with_emitter(EMITTER.clone())
            .wrap("total_charge", (|m: &Molecule, ()| m.charge) as ChargeFn)
    });

    static BUILD: Lazy<RenamedArguments<BuildFn>> = Lazy::new(|| {
        deprecate_arguments("0.4.0", [("q", "charge")], Some("Use keyword charge."), 3)
            .with_emitter(EMITTER.clone())
            .wrap("Molecule::build", build_molecule as BuildFn)
    });

    fn build_molecule((): (), kwargs: KwArgs<i32>) -> Molecule {
        Molecule {
            charge: kwargs.get("charge").copied().unwrap_or(0),
        }
    }

    impl Molecule {
        pub fn build(kwargs: KwArgs<i32>) -> Result<Molecule> {
            BUILD.call((), kwargs)
        }

        pub fn total_charge(&self) -> i32 {
            TOTAL_CHARGE.call(self, ())
        }
    }
}

fn kwargs(pairs: &[(&str, i32)]) -> KwArgs<i32> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_library_deprecations() {
    use legacy::Molecule;

    let molecule = Molecule::build(kwargs(&[("q", -1)])).unwrap();
    assert_eq!(molecule.charge, -1);
    let again = Molecule::build(kwargs(&[("q", 2)])).unwrap();
    assert_eq!(again.charge, 2);

    let err = Molecule::build(kwargs(&[("q", 1), ("charge", 1)])).err().unwrap();
    assert!(matches!(err, DeprecationError::ConflictingArguments { .. }));
    assert_eq!(
        err.to_string(),
        "Molecule::build received both charge and q (deprecated)."
    );

    assert_eq!(Molecule::build(KwArgs::new()).unwrap().charge, 0);

    for _ in 0..3 {
        assert_eq!(molecule.total_charge(), -1);
    }

    assert_eq!(
        SINK.messages(),
        vec![
            "The q argument is deprecated as of version 0.4.0 and will be removed no sooner than 3 months after the release. Instead use the charge argument Use keyword charge.".to_string(),
            "The total_charge method is deprecated as of version 0.4.0 and will be removed no sooner than 3 months after the release. Instead use the charge method.".to_string(),
        ]
    );
}

#[test]
fn test_emitter_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sunset.toml");
    std::fs::write(
        &path,
        r#"
[deprecation]
enabled = true
sink = "capture"
include_location = false
"#,
    )
    .unwrap();

    let config = DeprecationConfig::load(&path).unwrap();
    assert_eq!(config.sink, SinkKind::Capture);

    let emitter = Emitter::from_config(&config);
    emitter.emit("The x function is deprecated.".to_string(), 2);
    assert_eq!(emitter.captured().len(), 1);

    let missing = DeprecationConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, DeprecationError::Io(_)));
}
