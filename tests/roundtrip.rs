use bfce::{ConfigDocument, LoadedProfile};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const PROFILE: &str = "GstRender.Dx11Enable 1
GstRender.ResolutionWidth 2560
GstRender.ResolutionHeight 1440
GstRender.FieldOfView 90.000000
GstAudio.MasterVolume \"75\"
GstAudio.Dx11Enable 0
GstInput.MouseSensitivity -0.050000
GstInput.Aim-Assist_Slowdown \"\"
GstGameplay.InvertY
";

#[test]
fn parse_serialize_parse_is_stable() {
    let first = ConfigDocument::parse(PROFILE);
    let exported = first.serialize();
    let second = ConfigDocument::parse(&exported);
    assert_eq!(second, first);

    // And the exported text itself is a fixed point.
    assert_eq!(second.serialize(), exported);
}

#[test]
fn export_reconstructs_dotted_keys_with_quoted_values() {
    let exported = ConfigDocument::parse(PROFILE).serialize();
    let lines: Vec<_> = exported.lines().collect();
    assert_eq!(
        lines,
        vec![
            "GstRender.Dx11Enable \"1\"",
            "GstRender.ResolutionWidth \"2560\"",
            "GstRender.ResolutionHeight \"1440\"",
            "GstRender.FieldOfView \"90.000000\"",
            "GstAudio.MasterVolume \"75\"",
            "GstAudio.Dx11Enable \"0\"",
            "GstInput.MouseSensitivity \"-0.050000\"",
            "GstInput.Aim-Assist_Slowdown \"\"",
            "GstGameplay.InvertY \"None\"",
        ]
    );
    assert!(!exported.ends_with('\n'));
}

#[test]
fn edited_profile_roundtrips_through_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("PROFSAVE_profile");
    std::fs::write(&input_path, PROFILE)?;

    let mut profile = LoadedProfile::load_path(&input_path)?;
    assert!(profile.set_value("GstAudio", "MasterVolume", "40"));
    assert!(profile.set_value("GstGameplay", "InvertY", "1"));
    assert!(profile.dirty);

    let out_path = dir.path().join(profile.export_file_name());
    assert_eq!(out_path.file_name().unwrap(), "PROFSAVE_profile");
    profile.save_to_path(&out_path)?;
    assert!(!profile.dirty);

    let reloaded = LoadedProfile::load_path(&out_path)?;
    assert_eq!(reloaded.document, profile.document);
    assert_eq!(reloaded.document.get("GstAudio", "MasterVolume"), Some("40"));
    assert_eq!(reloaded.document.get("GstGameplay", "InvertY"), Some("1"));
    Ok(())
}

#[test]
fn numeric_literals_are_not_reformatted() {
    let parsed = ConfigDocument::parse("A.Zeroes 1.500000\nA.Signed +3\nA.Lead .25\n");
    assert_eq!(parsed.get("A", "Zeroes"), Some("1.500000"));
    assert_eq!(parsed.get("A", "Signed"), Some("+3"));
    assert_eq!(parsed.get("A", "Lead"), Some(".25"));
    assert_eq!(
        parsed.serialize(),
        "A.Zeroes \"1.500000\"\nA.Signed \"+3\"\nA.Lead \".25\""
    );
}
