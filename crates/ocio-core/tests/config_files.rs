//! Loading configs from disk and from an explicit environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use ocio_core::{Config, ConfigVersion, OcioError};
use tempfile::tempdir;

const V1_CONFIG: &str = r#"ocio_profile_version: 1

search_path: luts
strictparsing: true
luma: [0.2126, 0.7152, 0.0722]

roles:
  scene_linear: linear
  compositing_log: log10
  data: raw

displays:
  sRGB:
    - !<View> {name: Gamma, colorspace: Gamma 2.2}

colorspaces:
  - !<ColorSpace>
    name: linear
    family: ""
    bitdepth: 32f
    isdata: false
    allocation: lg2

  - !<ColorSpace>
    name: Gamma 2.2
    bitdepth: 32f
    to_reference: !<ExponentTransform> {value: [2.2, 2.2, 2.2, 1]}

  - !<ColorSpace>
    name: log10
    from_reference: !<LogTransform> {base: 10}

  - !<ColorSpace>
    name: film
    to_reference: !<FileTransform> {src: film.spi1d, interpolation: linear}

  - !<ColorSpace>
    name: raw
    isdata: true
"#;

fn write_config(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("config.ocio");
    fs::write(&path, text).unwrap();
    path
}

fn convert(config: &Config, src: &str, dst: &str, rgb: [f32; 3]) -> [f32; 3] {
    let mut px = [rgb];
    config
        .processor(src, dst)
        .unwrap()
        .default_cpu_processor()
        .apply_rgb(&mut px);
    px[0]
}

#[test]
fn v1_config_from_file() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), V1_CONFIG);

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.version(), ConfigVersion::V1);
    assert_eq!(config.num_colorspaces(), 5);
    assert_eq!(config.search_paths(), [dir.path().join("luts")]);
    assert_eq!(config.colorspace("compositing_log").unwrap().name(), "log10");

    let lin = convert(&config, "Gamma 2.2", "linear", [0.5, 0.5, 0.5]);
    assert_abs_diff_eq!(lin[0], 0.5_f32.powf(2.2), epsilon = 1e-6);

    let log = convert(&config, "linear", "log10", [100.0, 10.0, 1.0]);
    assert_abs_diff_eq!(log[0], 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(log[1], 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(log[2], 0.0, epsilon = 1e-5);
}

#[test]
fn file_transform_processor_fails() {
    let dir = tempdir().unwrap();
    let config = Config::from_file(write_config(dir.path(), V1_CONFIG)).unwrap();
    assert!(matches!(
        config.processor("film", "linear"),
        Err(OcioError::UnsupportedTransform { .. })
    ));
    // Data spaces bypass even unsupported transforms.
    assert!(config.processor("film", "raw").unwrap().is_identity());
}

#[test]
fn missing_and_malformed_files() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("absent.ocio")),
        Err(OcioError::ConfigNotFound { .. })
    ));
    // A directory is not a config.
    assert!(matches!(
        Config::from_file(dir.path()),
        Err(OcioError::ConfigNotFound { .. })
    ));

    let bad = write_config(dir.path(), "ocio_profile_version: 2\ncolorspaces: [\n");
    assert!(matches!(Config::from_file(bad), Err(OcioError::Yaml(_))));
}

#[test]
fn environment_points_at_file() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), V1_CONFIG);

    let env: HashMap<String, String> = [
        ("OCIO".to_string(), path.display().to_string()),
        ("OCIO_INACTIVE_COLORSPACES".to_string(), "film,raw".to_string()),
    ]
    .into_iter()
    .collect();

    let config = Config::from_env_source(&env).unwrap();
    let names: Vec<_> = config.active_colorspace_names().collect();
    assert_eq!(names, ["linear", "Gamma 2.2", "log10"]);
    assert_eq!(config.colorspace_name_by_index(3), "");
}
