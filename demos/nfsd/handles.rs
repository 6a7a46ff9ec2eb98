use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use byteorder::{BigEndian, ByteOrder};
use nfs_wire::protocol::nfs::error::NFSResult;
use nfs_wire::xdr::nfs3::{fileid3, nfs_fh3, nfsstat3};

/// Id of the exported root directory
pub const ROOT_ID: fileid3 = 1;

/// Two-way map between file ids and host paths.
///
/// A handle is the server generation followed by the file id, both as
/// big-endian u64. Handles minted by an earlier run of the server carry
/// another generation and are stale.
#[derive(Debug)]
pub struct HandleTable {
    generation: u64,
    paths: HashMap<fileid3, PathBuf>,
    ids: HashMap<PathBuf, fileid3>,
    next_id: fileid3,
}

impl HandleTable {
    pub fn new(root: PathBuf) -> Self {
        let generation = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        Self {
            generation,
            paths: HashMap::from([(ROOT_ID, root.clone())]),
            ids: HashMap::from([(root, ROOT_ID)]),
            next_id: ROOT_ID + 1,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&self, id: fileid3) -> nfs_fh3 {
        let mut data = vec![0; 16];
        BigEndian::write_u64(&mut data[..8], self.generation);
        BigEndian::write_u64(&mut data[8..], id);
        nfs_fh3 { data }
    }

    pub fn id_of_handle(&self, fh: &nfs_fh3) -> NFSResult<fileid3> {
        if fh.data.len() != 16 {
            return Err(nfsstat3::NFS3ERR_BADHANDLE);
        }
        let generation = BigEndian::read_u64(&fh.data[..8]);
        let id = BigEndian::read_u64(&fh.data[8..]);
        if generation != self.generation || !self.paths.contains_key(&id) {
            return Err(nfsstat3::NFS3ERR_STALE);
        }
        Ok(id)
    }

    pub fn path(&self, id: fileid3) -> NFSResult<PathBuf> {
        self.paths.get(&id).cloned().ok_or(nfsstat3::NFS3ERR_STALE)
    }

    /// Id of `path`, allocating one on first sight.
    pub fn id_of_path(&mut self, path: &Path) -> fileid3 {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.paths.insert(id, path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }

    pub fn forget(&mut self, path: &Path) {
        if let Some(id) = self.ids.remove(path) {
            self.paths.remove(&id);
        }
    }

    /// Moves `from` and everything below it to `to`, keeping their ids.
    pub fn rename(&mut self, from: &Path, to: &Path) {
        self.forget(to);
        let moved: Vec<(PathBuf, fileid3)> = self
            .ids
            .iter()
            .filter(|(path, _)| path.starts_with(from))
            .map(|(path, &id)| (path.clone(), id))
            .collect();
        for (old, id) in moved {
            let Ok(suffix) = old.strip_prefix(from) else { continue };
            let new = if suffix.as_os_str().is_empty() { to.to_path_buf() } else { to.join(suffix) };
            self.ids.remove(&old);
            self.ids.insert(new.clone(), id);
            self.paths.insert(id, new);
        }
    }
}
