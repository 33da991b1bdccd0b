//! libobs API version reported by `obs_module_ver`
//!
//! OBS refuses to load a module built against a newer major API than its
//! own, so the default (30.0) needs OBS Studio 30 or later. Build with
//! `LIBOBS_API_MAJOR` / `LIBOBS_API_MINOR` set to target an older release.

include!(concat!(env!("OUT_DIR"), "/libobs_api.rs"));

pub const LIBOBS_API_VER: u32 =
    (LIBOBS_API_MAJOR_VER << 24) | (LIBOBS_API_MINOR_VER << 16) | LIBOBS_API_PATCH_VER;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_packs_major_and_minor() {
        assert_eq!(LIBOBS_API_VER >> 24, LIBOBS_API_MAJOR_VER);
        assert_eq!((LIBOBS_API_VER >> 16) & 0xff, LIBOBS_API_MINOR_VER);
        assert_eq!(LIBOBS_API_VER & 0xffff, LIBOBS_API_PATCH_VER);
    }

    #[test]
    fn test_version_matches_build_env() {
        let major = option_env!("LIBOBS_API_MAJOR").map_or(30, |v| v.trim().parse().unwrap());
        assert_eq!(LIBOBS_API_MAJOR_VER, major);
    }
}
