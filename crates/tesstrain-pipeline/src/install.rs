// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Installation of the trained data bundle, with SHA-256 verification of the
// installed copy.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tesstrain_core::TrainingSession;
use tesstrain_core::error::{Result, TrainerError};
use tracing::{info, instrument};

/// Compute the SHA-256 hash of `data` as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Check `data` against an expected SHA-256 hex digest.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> Result<()> {
    let actual = hash_bytes(data);
    if actual == expected_hex {
        Ok(())
    } else {
        Err(TrainerError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

/// Copy `{dict}.traineddata` from the work directory into the tessdata
/// directory and return the installed path.
///
/// Overwrites an existing bundle of the same name. A permission failure is
/// reported as [`TrainerError::InsufficientPrivilege`].
#[instrument(skip_all, fields(dictionary = %session.dictionary_name()))]
pub fn install_traineddata(session: &TrainingSession) -> Result<PathBuf> {
    let file_name = session.names().traineddata();
    let source = session.artifact_path(&file_name);
    let destination = session.options().tessdata_path.join(&file_name);

    let data = std::fs::read(&source)?;
    let expected = hash_bytes(&data);

    std::fs::write(&destination, &data).map_err(|err| copy_error(err, &source, &destination))?;
    verify_hash(&std::fs::read(&destination)?, &expected)?;

    info!(
        destination = %destination.display(),
        sha256 = %expected,
        "Trained data installed"
    );
    Ok(destination)
}

fn copy_error(err: std::io::Error, source: &Path, destination: &Path) -> TrainerError {
    if err.kind() == ErrorKind::PermissionDenied {
        TrainerError::InsufficientPrivilege {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
        }
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use tesstrain_core::TrainingOptions;

    use super::*;
    use crate::testing::SessionFixture;

    #[test]
    fn hash_known_value() {
        assert_eq!(
            hash_bytes(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn verify_mismatched_hash() {
        match verify_hash(b"a", "0000").unwrap_err() {
            TrainerError::IntegrityMismatch { expected, actual } => {
                assert_eq!(expected, "0000");
                assert_eq!(actual, hash_bytes(b"a"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn installs_into_tessdata() {
        let fx = SessionFixture::new();
        let session = fx.session(TrainingOptions::default());
        session.ensure_work_dir().expect("work dir");
        std::fs::write(session.artifact_path("eng.traineddata"), b"bundle").expect("bundle");

        let installed = install_traineddata(&session).expect("install");

        assert_eq!(installed, fx.tessdata().join("eng.traineddata"));
        assert_eq!(std::fs::read(&installed).expect("read"), b"bundle");
    }

    #[test]
    fn missing_bundle_is_an_io_error() {
        let fx = SessionFixture::new();
        let session = fx.session(TrainingOptions::default());
        let err = install_traineddata(&session).unwrap_err();
        assert!(matches!(err, TrainerError::Io(_)));
    }

    #[test]
    fn permission_denied_becomes_insufficient_privilege() {
        let err = copy_error(
            std::io::Error::from(ErrorKind::PermissionDenied),
            Path::new("eng.traineddata"),
            Path::new("/usr/share/tessdata/eng.traineddata"),
        );
        match err {
            TrainerError::InsufficientPrivilege { destination, .. } => {
                assert_eq!(destination, Path::new("/usr/share/tessdata/eng.traineddata"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn other_copy_failures_stay_io_errors() {
        let err = copy_error(
            std::io::Error::from(ErrorKind::StorageFull),
            Path::new("a"),
            Path::new("b"),
        );
        assert!(matches!(err, TrainerError::Io(_)));
    }
}
