//! Loads the built `cdylib` at runtime and drives it only through symbols
//! resolved by name.

use std::ffi::{CStr, CString};
use std::path::PathBuf;
use std::sync::Mutex;

use approx::assert_abs_diff_eq;
use libloading::Library;
use shim::loader::{self, SYMBOLS, ShimLibrary};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// The shim sits next to this test binary's `deps/` directory, or inside it.
fn shim_path() -> PathBuf {
    let exe = std::env::current_exe().unwrap();
    let deps = exe.parent().unwrap();
    let name = loader::library_filename();
    [deps.join(&name), deps.parent().unwrap().join(&name)]
        .into_iter()
        .find(|p| p.is_file())
        .unwrap_or_else(|| panic!("{name:?} not found near {}", deps.display()))
}

#[test]
fn every_export_resolves_by_name() {
    let lib = unsafe { Library::new(shim_path()) }.unwrap();
    for name in SYMBOLS {
        let sym = unsafe { lib.get::<*const ()>(name.as_bytes()) };
        assert!(sym.is_ok(), "{name} is not exported");
    }
}

#[test]
fn sequential_scenario_through_loaded_library() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: the only test here touching the environment holds ENV_LOCK.
    unsafe {
        std::env::remove_var("OCIO_INACTIVE_COLORSPACES");
        std::env::set_var("OCIO", "ocio://default");
    }

    let lib = unsafe { ShimLibrary::open(shim_path()) }.unwrap();
    let api = lib.api();

    unsafe {
        let ctx = (api.create_context)();
        assert!(!ctx.is_null());

        let count = (api.get_num_colorspaces)(ctx);
        assert!(count > 0);
        let name0 = CStr::from_ptr((api.get_colorspace_name)(ctx, 0)).to_owned();
        assert!(!name0.is_empty());
        assert!(CStr::from_ptr((api.get_colorspace_name)(ctx, count)).is_empty());

        let proc_ = (api.create_processor)(ctx, name0.as_ptr(), name0.as_ptr());
        assert!(!proc_.is_null());
        let mut pixel = [1.0_f32, 1.0, 1.0, 1.0];
        (api.apply_transform)(proc_, pixel.as_mut_ptr(), 1);
        assert_eq!(pixel, [1.0, 1.0, 1.0, 1.0]);
        (api.destroy_processor)(proc_);

        let src = CString::new("ACEScg").unwrap();
        let dst = CString::new("ACES2065-1").unwrap();
        let proc_ = (api.create_processor)(ctx, src.as_ptr(), dst.as_ptr());
        assert!(!proc_.is_null());
        (api.destroy_context)(ctx);

        let mut pixel = [1.0_f32, 0.0, 0.0, 1.0];
        (api.apply_transform)(proc_, pixel.as_mut_ptr(), 1);
        assert_abs_diff_eq!(pixel[0], 0.695_452_2, epsilon = 1e-5);
        (api.destroy_processor)(proc_);
    }
}
