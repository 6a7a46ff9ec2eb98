//! The Call/Reply contract shared by every NFS, MOUNT and PORTMAP procedure.
//!
//! A procedure is a zero-sized marker type implementing [`Procedure`]: it names
//! the procedure number, the argument type decoded from a call and the result
//! type encoded into the reply. Procedures whose result starts with a status
//! discriminant (`nfsstat3`, `mountstat3`) also implement [`StatusProcedure`],
//! and their result is a [`Reply`]: the status, followed by the success body
//! when the status is OK and by the failure body otherwise.
//!
//! Each status procedure declares the closed set of failure statuses it may
//! return (`ALLOWED_ERRORS`, taken from the ERRORS section of its RFC). Building
//! a reply with any other status panics: such a reply is a bug in the handler,
//! and a client could not interpret it.

use std::fmt;
use std::io::{Read, Write};

use crate::protocol::xdr::mount::mountstat3;
use crate::protocol::xdr::nfs3::nfsstat3;
use crate::protocol::xdr::{deserialize, Deserialize, Serialize, XdrSize};

/// Bounds every argument and result type satisfies.
pub trait Message:
    Serialize + Deserialize + XdrSize + Default + fmt::Debug + Send + 'static
{
}

impl<T> Message for T where
    T: Serialize + Deserialize + XdrSize + Default + fmt::Debug + Send + 'static
{
}

/// One remote procedure of a program.
pub trait Procedure: Send + Sync + 'static {
    /// Procedure number within its program
    const PROC: u32;
    /// Name used in logs, e.g. `"LOOKUP"`
    const NAME: &'static str;

    /// Arguments decoded from the call body
    type Args: Message;
    /// Results encoded into the reply body
    type Res: Message;
    /// Failure a handler may report instead of building `Res` itself
    type Error: fmt::Debug + Send + 'static;

    /// Turns a handler failure into the reply sent to the client.
    fn reject(err: Self::Error) -> Self::Res;
}

/// Status discriminant that starts a procedure result.
pub trait Status:
    Copy + Eq + fmt::Debug + Default + Serialize + Deserialize + XdrSize + Send + Sync + 'static
{
    /// The success value
    const OK: Self;
}

impl Status for nfsstat3 {
    const OK: Self = nfsstat3::NFS3_OK;
}

impl Status for mountstat3 {
    const OK: Self = mountstat3::MNT3_OK;
}

/// A procedure whose result is a status-discriminated union.
pub trait StatusProcedure: Procedure {
    type Status: Status;
    /// Result body when the status is OK
    type ResOk: Message + PartialEq;
    /// Result body for every failure status
    type ResFail: Message + PartialEq;

    /// Failure statuses this procedure is allowed to return
    const ALLOWED_ERRORS: &'static [Self::Status];

    /// Whether `status` may be sent as the failure status of this procedure.
    fn allows(status: Self::Status) -> bool {
        Self::ALLOWED_ERRORS.contains(&status)
    }
}

/// Reply of a [`StatusProcedure`].
///
/// Only the arm selected by `status` is encoded. Fields of the failure body
/// default to absent (no attributes, empty `wcc_data`).
pub struct Reply<P: StatusProcedure> {
    status: P::Status,
    resok: P::ResOk,
    resfail: P::ResFail,
}

impl<P: StatusProcedure> Reply<P> {
    /// A successful reply.
    pub fn ok(resok: P::ResOk) -> Self {
        Reply { status: P::Status::OK, resok, resfail: P::ResFail::default() }
    }

    /// A failed reply with an empty failure body.
    ///
    /// # Panics
    ///
    /// Panics when `status` is the success status or is not in `P::ALLOWED_ERRORS`.
    pub fn error(status: P::Status) -> Self {
        Self::fail(status, P::ResFail::default())
    }

    /// A failed reply carrying `resfail`.
    ///
    /// # Panics
    ///
    /// Panics when `status` is the success status or is not in `P::ALLOWED_ERRORS`.
    pub fn fail(status: P::Status, resfail: P::ResFail) -> Self {
        assert!(
            status != P::Status::OK,
            "{} failure reply built with the success status",
            P::NAME
        );
        assert!(P::allows(status), "{} is not allowed to return {:?}", P::NAME, status);
        Reply { status, resok: P::ResOk::default(), resfail }
    }

    pub fn status(&self) -> P::Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == P::Status::OK
    }

    /// The success body, when the status is OK.
    pub fn resok(&self) -> Option<&P::ResOk> {
        self.is_ok().then_some(&self.resok)
    }

    /// The failure body, when the status is not OK.
    pub fn resfail(&self) -> Option<&P::ResFail> {
        (!self.is_ok()).then_some(&self.resfail)
    }

    pub fn into_result(self) -> Result<P::ResOk, (P::Status, P::ResFail)> {
        if self.is_ok() {
            Ok(self.resok)
        } else {
            Err((self.status, self.resfail))
        }
    }
}

impl<P: StatusProcedure> Default for Reply<P> {
    fn default() -> Self {
        Reply { status: P::Status::OK, resok: P::ResOk::default(), resfail: P::ResFail::default() }
    }
}

impl<P: StatusProcedure> fmt::Debug for Reply<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(P::NAME);
        s.field("status", &self.status);
        if self.is_ok() {
            s.field("resok", &self.resok);
        } else {
            s.field("resfail", &self.resfail);
        }
        s.finish()
    }
}

impl<P: StatusProcedure> PartialEq for Reply<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.status != other.status {
            return false;
        }
        if self.is_ok() {
            self.resok == other.resok
        } else {
            self.resfail == other.resfail
        }
    }
}

impl<P: StatusProcedure> Serialize for Reply<P> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.status.serialize(dest)?;
        if self.is_ok() {
            self.resok.serialize(dest)
        } else {
            self.resfail.serialize(dest)
        }
    }
}

/// Decoding never checks the allow-list: a client must be able to read
/// whatever the server sent.
impl<P: StatusProcedure> Deserialize for Reply<P> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.status = deserialize(src)?;
        if self.is_ok() {
            self.resok = deserialize(src)?;
            self.resfail = P::ResFail::default();
        } else {
            self.resok = P::ResOk::default();
            self.resfail = deserialize(src)?;
        }
        Ok(())
    }
}

impl<P: StatusProcedure> XdrSize for Reply<P> {
    fn packed_size(&self) -> usize {
        self.status.packed_size()
            + if self.is_ok() { self.resok.packed_size() } else { self.resfail.packed_size() }
    }
}

/// Declares a status procedure: the marker type, its [`Procedure`] and
/// [`StatusProcedure`] impls, and its allow-list.
macro_rules! status_procedure {
    (
        $(#[$meta:meta])*
        $name:ident {
            proc: $proc:expr,
            name: $label:literal,
            args: $args:ty,
            status: $status:ident,
            resok: $resok:ty,
            resfail: $resfail:ty,
            errors: [$($err:ident),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $crate::protocol::rpc::Procedure for $name {
            const PROC: u32 = $proc as u32;
            const NAME: &'static str = $label;

            type Args = $args;
            type Res = $crate::protocol::rpc::Reply<$name>;
            type Error = $status;

            fn reject(status: $status) -> Self::Res {
                $crate::protocol::rpc::Reply::error(status)
            }
        }

        impl $crate::protocol::rpc::StatusProcedure for $name {
            type Status = $status;
            type ResOk = $resok;
            type ResFail = $resfail;

            const ALLOWED_ERRORS: &'static [$status] = &[$($status::$err),*];
        }
    };
}

/// Declares a procedure whose result carries no status, so a handler
/// can never fail.
macro_rules! plain_procedure {
    (
        $(#[$meta:meta])*
        $name:ident {
            proc: $proc:expr,
            name: $label:literal,
            args: $args:ty,
            res: $res:ty $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $crate::protocol::rpc::Procedure for $name {
            const PROC: u32 = $proc as u32;
            const NAME: &'static str = $label;

            type Args = $args;
            type Res = $res;
            type Error = std::convert::Infallible;

            fn reject(err: std::convert::Infallible) -> Self::Res {
                match err {}
            }
        }
    };
}

pub(crate) use plain_procedure;
pub(crate) use status_procedure;
