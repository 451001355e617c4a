use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::success;
use crate::utils::path::absolute_output_path;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, or zip it to `<dest_file>.zip`
    /// with `compress`. Returns the path of the file actually written.
    pub fn backup(
        pool: &DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        let dest = absolute_output_path(dest_file)?;

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        let target = if compress {
            archive_path(&dest)
        } else {
            dest
        };
        if is_same_file(src, &target) {
            return Err(AppError::validation(format!(
                "backup target {} is the database itself",
                target.display()
            )));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        ensure_writable(&target, force)?;

        if compress {
            write_archive(src, &target)?;
        } else {
            fs::copy(src, &target)?;
        }
        success(format!("Backup created: {}", target.display()));

        ttlog_soft(
            &pool.conn,
            "backup",
            &target.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(target)
    }
}

/// `x.sqlite` → `x.zip`; a path already ending in `.zip` is kept.
fn archive_path(dest: &Path) -> PathBuf {
    let is_zip = dest
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
    if is_zip {
        dest.to_path_buf()
    } else {
        dest.with_extension("zip")
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Stream the database straight into a zip archive at `zip_path`. The entry
/// keeps the database's own file name.
fn write_archive(src: &Path, zip_path: &Path) -> AppResult<()> {
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Export(format!("invalid database path: {}", src.display())))?;

    let mut db_file = fs::File::open(src)?;
    let mut zip = ZipWriter::new(fs::File::create(zip_path)?);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut db_file, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;
    Ok(())
}
