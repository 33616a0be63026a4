//! Buffered log file that rolls itself over once it grows past a size limit.
//!
//! The physical file is opened lazily on the first write and can be closed at any
//! time; the next write simply reopens it in append mode. Rotation renames the
//! current file to `name.1.ext`, shifting older backups up by one index and
//! discarding whatever falls off the end of the retention window.

use super::Sink;
use crate::Error;
use crate::config::format_size;
use crate::internal;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Size threshold used by [`RotatingFile::open`].
pub const DEFAULT_LIMIT: u64 = 1024 * 1024;
/// Two pages.
pub const DEFAULT_BUFFER_SIZE: usize = 2 * 4096;
/// `rw-rw-rw-` before umask.
pub const DEFAULT_MODE: u32 = 0o666;

/// Tunables for a rotating file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatingFileOptions {
    /// Rotation trigger in bytes; `0` disables rotation.
    pub limit: u64,
    /// Backups kept as `name.1.ext` .. `name.N.ext`; `0` deletes the file on rotation.
    pub backups: usize,
    /// Write buffer capacity; `0` writes straight through to the descriptor.
    pub buffer_size: usize,
    /// Permission bits for newly created files (Unix only).
    pub mode: u32,
}

impl Default for RotatingFileOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            backups: 1,
            buffer_size: DEFAULT_BUFFER_SIZE,
            mode: DEFAULT_MODE,
        }
    }
}

impl RotatingFileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn backups(mut self, backups: usize) -> Self {
        self.backups = backups;
        self
    }

    #[must_use]
    pub const fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug)]
enum Handle {
    Direct(File),
    Buffered(BufWriter<File>),
}

impl Handle {
    fn new(file: File, buffer_size: usize) -> Self {
        if buffer_size > 0 {
            Self::Buffered(BufWriter::with_capacity(buffer_size, file))
        } else {
            Self::Direct(file)
        }
    }

    fn file(&self) -> &File {
        match self {
            Self::Direct(file) => file,
            Self::Buffered(writer) => writer.get_ref(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Direct(file) => file.write_all(buf),
            Self::Buffered(writer) => writer.write_all(buf),
        }
    }

    /// Buffered handles drain the buffer; direct handles ask the OS to sync.
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Direct(file) => file.sync_all(),
            Self::Buffered(writer) => writer.flush(),
        }
    }

    fn close(self) -> io::Result<()> {
        match self {
            Self::Direct(_) => Ok(()),
            Self::Buffered(writer) => writer
                .into_inner()
                .map(drop)
                .map_err(io::IntoInnerError::into_error),
        }
    }
}

#[derive(Debug)]
struct State {
    options: RotatingFileOptions,
    handle: Option<Handle>,
    /// Authoritative only while `handle` is open.
    size: u64,
}

impl State {
    fn ensure_open(&mut self, path: &Path) -> io::Result<&mut Handle> {
        match self.handle {
            Some(ref mut handle) => Ok(handle),
            None => {
                let file = open_append(path, self.options.mode)?;
                // Someone else may have truncated or rotated the file while it was closed
                self.size = file.metadata().map_or(0, |m| m.len());
                internal::trace(
                    "FILE",
                    &format!("Opened {} at {} bytes", path.display(), self.size),
                );
                Ok(self
                    .handle
                    .insert(Handle::new(file, self.options.buffer_size)))
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        let result = self.handle.take().map_or(Ok(()), Handle::close);
        self.size = 0;
        result
    }
}

/// Exclusively owned log file with buffering and size-triggered rotation.
///
/// Every operation takes the instance lock, so rotation never interleaves with a
/// write and the tracked size never races.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    state: RwLock<State>,
}

impl RotatingFile {
    /// Opens `path` with default options. See [`RotatingFile::open_with`].
    ///
    /// # Errors
    /// Same as [`RotatingFile::open_with`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::open_with(path, RotatingFileOptions::default())
    }

    /// Validates that the parent directory exists. The file itself is not touched
    /// until the first write.
    ///
    /// # Errors
    /// `DirNotFound` / `NotADirectory` when the parent directory is unusable, `Io` when
    /// it cannot be inspected.
    pub fn open_with(path: impl Into<PathBuf>, options: RotatingFileOptions) -> Result<Self, Error> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::NotADirectory(dir)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::DirNotFound(dir)),
            Err(e) => return Err(e.into()),
        }

        let size = fs::metadata(&path).map_or(0, |m| m.len());
        internal::debug(
            "FILE",
            &format!(
                "Log file {} (limit={}, backups={}, existing={})",
                path.display(),
                format_size(options.limit),
                options.backups,
                format_size(size)
            ),
        );

        Ok(Self {
            path,
            state: RwLock::new(State {
                options,
                handle: None,
                size,
            }),
        })
    }

    fn lock(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `buf`, rotating first when the previous writes pushed the file past the limit.
    ///
    /// The limit is a trigger point, not a hard cap: the write that crosses it still
    /// lands in the current file and the *next* write rotates.
    ///
    /// A closed file's size is re-read from disk first, so a rotation that keeps failing
    /// fails every write instead of letting the file grow unchecked.
    ///
    /// # Errors
    /// Open/write failures, or a rotation that could not move the current file aside.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();

        if state.handle.is_none() {
            state.size = fs::metadata(&self.path).map_or(0, |m| m.len());
        }
        if state.options.limit > 0 && state.size > state.options.limit {
            let backups = state.options.backups;
            self.rotate_locked(&mut state, backups)?;
        }

        state.ensure_open(&self.path)?.write_all(buf)?;
        state.size += buf.len() as u64;
        Ok(buf.len())
    }

    /// Rotates now, keeping `backups` numbered backups (`0` deletes the file instead).
    ///
    /// # Errors
    /// Failure to rename (or delete) the current file. Backup shuffling is best effort.
    pub fn rotate(&self, backups: usize) -> io::Result<()> {
        let mut state = self.lock();
        self.rotate_locked(&mut state, backups)
    }

    fn rotate_locked(&self, state: &mut State, backups: usize) -> io::Result<()> {
        if let Err(e) = state.close() {
            internal::debug("FILE", &format!("Close before rotation failed: {e}"));
        }

        if matches!(fs::metadata(&self.path), Err(ref e) if e.kind() == io::ErrorKind::NotFound) {
            return Ok(());
        }

        if backups < 1 {
            internal::debug("FILE", &format!("Removing {}", self.path.display()));
            return remove_file(&self.path).inspect_err(|e| {
                internal::error(
                    "FILE",
                    &format!("Failed to remove {}: {e}", self.path.display()),
                );
            });
        }

        // First free slot ends the chain; with no free slot the oldest backup is dropped
        let mut free = 1;
        while free <= backups && fs::metadata(self.backup_path(free)).is_ok() {
            free += 1;
        }
        let mut slot = if free > backups {
            free = backups;
            let oldest = self.backup_path(backups);
            if let Err(e) = remove_file(&oldest) {
                internal::debug(
                    "FILE",
                    &format!("Failed to remove {}: {e}", oldest.display()),
                );
            }
            oldest
        } else {
            self.backup_path(free)
        };

        for k in (1..free).rev() {
            let prev = self.backup_path(k);
            if let Err(e) = fs::rename(&prev, &slot) {
                internal::debug(
                    "FILE",
                    &format!(
                        "Failed to shift {} -> {}: {e}",
                        prev.display(),
                        slot.display()
                    ),
                );
            }
            slot = prev;
        }

        let newest = self.backup_path(1);
        internal::debug(
            "FILE",
            &format!("Rotating {} -> {}", self.path.display(), newest.display()),
        );
        match fs::rename(&self.path, &newest) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                internal::error(
                    "FILE",
                    &format!("Failed to rotate {}: {e}", self.path.display()),
                );
                Err(e)
            }
            _ => Ok(()),
        }
    }

    /// Drains the write buffer, or syncs the descriptor when unbuffered. No-op while closed.
    ///
    /// # Errors
    /// I/O errors from the flush or sync.
    pub fn flush(&self) -> io::Result<()> {
        let mut state = self.lock();
        state.handle.as_mut().map_or(Ok(()), Handle::flush)
    }

    /// Flushes and releases the descriptor. A later write reopens the same path.
    ///
    /// # Errors
    /// Failure to flush buffered bytes.
    pub fn close(&self) -> io::Result<()> {
        self.lock().close()
    }

    /// Tracked size while open, a fresh stat while closed.
    #[must_use]
    pub fn size(&self) -> u64 {
        let state = self.read();
        if state.handle.is_some() {
            state.size
        } else {
            fs::metadata(&self.path).map_or(state.size, |m| m.len())
        }
    }

    /// Metadata of the open descriptor, or of the path while closed.
    /// Bytes still sitting in the write buffer are not reflected.
    ///
    /// # Errors
    /// Stat failures, including a missing file while closed.
    pub fn stat(&self) -> io::Result<Metadata> {
        let state = self.read();
        match &state.handle {
            Some(handle) => handle.file().metadata(),
            None => fs::metadata(&self.path),
        }
    }

    /// Changes the rotation trigger; `0` disables rotation.
    pub fn set_limit(&self, limit: u64) -> &Self {
        self.lock().options.limit = limit;
        self
    }

    /// Changes how many backups automatic rotation keeps.
    pub fn set_backups(&self, backups: usize) -> &Self {
        self.lock().options.backups = backups;
        self
    }

    /// Takes effect the next time the file is opened.
    pub fn set_buffer_size(&self, size: usize) -> &Self {
        self.lock().options.buffer_size = size;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn options(&self) -> RotatingFileOptions {
        self.read().options
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.read().options.limit
    }

    #[must_use]
    pub fn backups(&self) -> usize {
        self.read().options.backups
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.read().handle.is_some()
    }

    /// `dir/name.ext` -> `dir/name.<k>.ext`, splitting at the last `.` of the file name,
    /// so `dir/.log` becomes `dir/.<k>.log`. Names without a `.` get `dir/name.<k>`.
    #[must_use]
    pub fn backup_path(&self, k: usize) -> PathBuf {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        let backup = match name.rfind('.') {
            Some(dot) => format!("{}.{k}{}", &name[..dot], &name[dot..]),
            None => format!("{name}.{k}"),
        };
        self.path.with_file_name(backup)
    }
}

fn open_append(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path)
}

fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Sink for RotatingFile {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf)
    }

    fn flush(&self) -> io::Result<()> {
        Self::flush(self)
    }

    fn close(&self) -> io::Result<()> {
        Self::close(self)
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RotatingFile::write(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        RotatingFile::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unbuffered(dir: &TempDir, name: &str, limit: u64, backups: usize) -> RotatingFile {
        let options = RotatingFileOptions::new()
            .limit(limit)
            .backups(backups)
            .buffer_size(0);
        RotatingFile::open_with(dir.path().join(name), options).unwrap()
    }

    #[test]
    fn backup_names_keep_the_extension_last() {
        let file = RotatingFile::open("app.log").unwrap();
        assert_eq!(file.backup_path(1), PathBuf::from("app.1.log"));
        assert_eq!(file.backup_path(12), PathBuf::from("app.12.log"));
    }

    #[test]
    fn backup_names_of_dot_files_split_at_the_last_dot() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::open(dir.path().join(".log")).unwrap();
        assert_eq!(file.backup_path(1), dir.path().join(".1.log"));

        let file = RotatingFile::open(dir.path().join("app.tar.gz")).unwrap();
        assert_eq!(file.backup_path(3), dir.path().join("app.tar.3.gz"));
    }

    #[test]
    fn backup_names_without_extension() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::open(dir.path().join("server")).unwrap();
        assert_eq!(file.backup_path(2), dir.path().join("server.2"));
    }

    #[test]
    fn open_does_not_create_the_file() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "lazy.log", 0, 1);
        assert!(!file.is_open());
        assert!(!dir.path().join("lazy.log").exists());
        assert_eq!(file.size(), 0);
    }

    #[test]
    fn open_picks_up_existing_size() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.log"), b"0123456789").unwrap();
        let file = unbuffered(&dir, "old.log", 0, 1);
        assert_eq!(file.size(), 10);
    }

    #[test]
    fn open_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = RotatingFile::open(dir.path().join("nope").join("x.log")).unwrap_err();
        assert!(matches!(err, Error::DirNotFound(_)));
    }

    #[test]
    fn open_rejects_file_as_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let err = RotatingFile::open(blocker.join("x.log")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn buffered_bytes_count_towards_size() {
        let dir = TempDir::new().unwrap();
        let options = RotatingFileOptions::new().limit(0).buffer_size(1024);
        let file = RotatingFile::open_with(dir.path().join("buf.log"), options).unwrap();

        file.write(b"hello").unwrap();
        assert_eq!(file.size(), 5);
        assert_eq!(fs::read(dir.path().join("buf.log")).unwrap().len(), 0);

        file.flush().unwrap();
        assert_eq!(fs::read(dir.path().join("buf.log")).unwrap(), b"hello");
    }

    #[test]
    fn close_flushes_and_resets() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::open(dir.path().join("c.log")).unwrap();
        file.write(b"abc").unwrap();
        file.close().unwrap();

        assert!(!file.is_open());
        assert_eq!(fs::read(dir.path().join("c.log")).unwrap(), b"abc");
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn full_chain_drops_the_oldest() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "r.log", 0, 2);
        fs::write(file.path(), b"new").unwrap();
        fs::write(file.backup_path(1), b"mid").unwrap();
        fs::write(file.backup_path(2), b"old").unwrap();

        file.rotate(2).unwrap();

        assert!(!file.path().exists());
        assert_eq!(fs::read(file.backup_path(1)).unwrap(), b"new");
        assert_eq!(fs::read(file.backup_path(2)).unwrap(), b"mid");
        assert!(!file.backup_path(3).exists());
    }

    #[test]
    fn gap_in_chain_absorbs_the_shift() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "g.log", 0, 3);
        fs::write(file.path(), b"cur").unwrap();
        fs::write(file.backup_path(1), b"one").unwrap();
        fs::write(file.backup_path(3), b"three").unwrap();

        file.rotate(3).unwrap();

        assert_eq!(fs::read(file.backup_path(1)).unwrap(), b"cur");
        assert_eq!(fs::read(file.backup_path(2)).unwrap(), b"one");
        assert_eq!(fs::read(file.backup_path(3)).unwrap(), b"three");
    }

    #[test]
    fn rotating_a_missing_file_leaves_backups_alone() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "m.log", 0, 2);
        fs::write(file.backup_path(1), b"one").unwrap();

        file.rotate(2).unwrap();

        assert_eq!(fs::read(file.backup_path(1)).unwrap(), b"one");
        assert!(!file.backup_path(2).exists());
    }

    #[test]
    fn set_buffer_size_applies_on_reopen() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "s.log", 0, 1);
        file.write(b"a").unwrap();
        file.set_buffer_size(64);
        file.write(b"b").unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"ab");

        file.close().unwrap();
        file.write(b"c").unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"ab");
        file.flush().unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"abc");
    }

    #[test]
    fn io_write_through_shared_reference() {
        let dir = TempDir::new().unwrap();
        let file = unbuffered(&dir, "w.log", 0, 1);
        writeln!(&file, "line {}", 1).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "line 1\n");
    }
}
