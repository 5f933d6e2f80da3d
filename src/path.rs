//! Path resolution capability.
//!
//! The engine never touches the filesystem directly: predicate verbs go
//! through a [`PathResolver`], which expands the home shorthand, anchors
//! relative paths and stats the result. [`FsResolver`] is the real one.

use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Filesystem capability used by the predicate verbs.
pub trait PathResolver {
    /// Expand a leading `~` or `~user`. Unresolvable users leave `path` as is.
    fn expand_home(&self, path: &str) -> String;

    /// Make `path` absolute and lexically clean.
    fn absolute(&self, path: &str) -> io::Result<PathBuf>;

    /// Stat `path`, following symlinks.
    fn metadata(&self, path: &Path) -> io::Result<Metadata>;
}

/// Resolves relative paths against a fixed base directory.
#[derive(Debug, Clone)]
pub struct FsResolver {
    base: PathBuf,
}

impl FsResolver {
    /// `base` should already be absolute; it is cleaned but not canonicalized.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: normalize(&base.into()) }
    }

    /// Resolver rooted at the process working directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl PathResolver for FsResolver {
    fn expand_home(&self, path: &str) -> String {
        expand_home(path)
    }

    fn absolute(&self, path: &str) -> io::Result<PathBuf> {
        let path = Path::new(path);
        if path.is_absolute() { Ok(normalize(path)) } else { Ok(normalize(&self.base.join(path))) }
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        std::fs::metadata(path)
    }
}

/// Expand a leading `~` (current user) or `~name` (named user).
///
/// Returns the input unchanged when it has no home shorthand or the user
/// cannot be resolved.
pub fn expand_home(path: &str) -> String {
    let Some(caps) = crate::regex!(r"^~([^/]*)(?:/|$)").captures(path) else {
        return path.to_string();
    };
    let user = caps.get(1).map_or("", |m| m.as_str());
    let rest = &path[caps.get(0).map_or(0, |m| m.end())..];

    let home = if user.is_empty() { etcetera::home_dir().ok() } else { home_of(user) };
    let Some(home) = home else {
        log::warn!("could not resolve the home directory of {:?}; leaving {path:?} unexpanded", user);
        return path.to_string();
    };

    normalize(&home.join(rest)).to_string_lossy().into_owned()
}

/// Lexically clean a path: drop `.` components, let `..` pop the previous
/// normal component, and drop trailing separators. Symlinks are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_))) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(unix)]
fn home_of(user: &str) -> Option<PathBuf> {
    lookup_home(user, 4096)
}

/// `getpwnam_r` with a string buffer that starts at `capacity` bytes and
/// doubles on `ERANGE`, up to 1 MiB.
#[cfg(unix)]
fn lookup_home(user: &str, capacity: usize) -> Option<PathBuf> {
    use std::ffi::{CStr, CString, OsStr};
    use std::os::unix::ffi::OsStrExt;

    let name = CString::new(user).ok()?;
    let mut buf = vec![0 as libc::c_char; capacity.max(1)];

    loop {
        // SAFETY: all-zero is a valid bit pattern for `passwd` (null pointers and integers).
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        // SAFETY: every pointer is valid for the duration of the call and `buf.len()`
        // is the true capacity of `buf`.
        let rc = unsafe { libc::getpwnam_r(name.as_ptr(), &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result) };

        if rc == libc::ERANGE && buf.len() < 1 << 20 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_dir.is_null() {
            return None;
        }

        // SAFETY: on success `pw_dir` points to a NUL-terminated string inside `buf`.
        let dir = unsafe { CStr::from_ptr(pwd.pw_dir) };
        return Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())));
    }
}

#[cfg(not(unix))]
fn home_of(_user: &str) -> Option<PathBuf> {
    None
}
