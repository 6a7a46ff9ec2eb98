//! Program/version/procedure routing of inbound calls.
//!
//! A [`Program`] is the procedure table of one program version. A
//! [`Dispatcher`] serves any number of programs and answers every call with
//! exactly one reply record, checking in this order:
//!
//! 1. RPC version other than 2: denied `RPC_MISMATCH{2, 2}`
//! 2. unknown program: `PROG_UNAVAIL`
//! 3. program served in other versions only: `PROG_MISMATCH{low, high}`
//! 4. procedure 0: empty success
//! 5. unknown procedure: `PROC_UNAVAIL`
//! 6. undecodable arguments: `GARBAGE_ARGS`
//!
//! and otherwise runs the registered handler.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::protocol::rpc::wire::encode_record;
use crate::protocol::rpc::{CallContext, ConnectionContext, Procedure};
use crate::protocol::xdr::rpc::{
    rpc_body, rpc_msg, GarbageArgs, MismatchReply, ProcedureUnavailable, ProgramMismatch,
    ProgramUnavailable, SuccessHeader, RPC_VERSION,
};
use crate::protocol::xdr::{deserialize, Decodable};

/// Future resolving to an encoded reply record
type ReplyFuture = BoxFuture<'static, Vec<u8>>;

/// A registered handler with its procedure types erased.
trait ErasedHandler: Send + Sync {
    /// Decodes the arguments and starts the handler.
    ///
    /// Fails without running the handler when the arguments cannot be decoded.
    fn start(&self, ctx: CallContext, args: &[u8]) -> std::io::Result<ReplyFuture>;
}

struct Handler<P, F> {
    handler: F,
    _procedure: PhantomData<fn() -> P>,
}

impl<P, F, Fut> ErasedHandler for Handler<P, F>
where
    P: Procedure,
    F: Fn(CallContext, P::Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P::Res, P::Error>> + Send + 'static,
{
    fn start(&self, ctx: CallContext, args: &[u8]) -> std::io::Result<ReplyFuture> {
        let args = P::Args::decode(args)?;
        let xid = ctx.xid;
        debug!("{} xid {} from {} {:?}", P::NAME, xid, ctx.client_addr, args);
        let fut = (self.handler)(ctx, args);

        Ok(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => {
                    debug!("{} xid {} failed with {:?}", P::NAME, xid, err);
                    P::reject(err)
                }
            };
            trace!("{} xid {} replies {:?}", P::NAME, xid, res);
            match encode_record(&SuccessHeader { xid }, &res) {
                Ok(record) => record,
                Err(e) => panic!("{} xid {} reply cannot be encoded: {}", P::NAME, xid, e),
            }
        }
        .boxed())
    }
}

/// Procedure table of one program version.
pub struct Program {
    prog: u32,
    vers: u32,
    procedures: HashMap<u32, Arc<dyn ErasedHandler>>,
}

impl Program {
    pub fn new(prog: u32, vers: u32) -> Program {
        Program { prog, vers, procedures: HashMap::new() }
    }

    pub fn prog(&self) -> u32 {
        self.prog
    }

    pub fn vers(&self) -> u32 {
        self.vers
    }

    /// Registers the handler of procedure `P`, replacing any earlier one.
    ///
    /// The handler receives the call context and the decoded arguments. An
    /// `Err` is turned into a reply by [`Procedure::reject`]; for status
    /// procedures that enforces the allow-list.
    ///
    /// # Panics
    ///
    /// Panics when `P` is procedure 0, which every program answers itself.
    pub fn register<P, F, Fut>(mut self, handler: F) -> Program
    where
        P: Procedure,
        F: Fn(CallContext, P::Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P::Res, P::Error>> + Send + 'static,
    {
        assert_ne!(P::PROC, 0, "procedure 0 is answered by the dispatcher");
        let handler = Handler::<P, F> { handler, _procedure: PhantomData };
        self.procedures.insert(P::PROC, Arc::new(handler));
        self
    }

    /// Whether a handler is registered for `proc`.
    pub fn serves(&self, proc: u32) -> bool {
        proc == 0 || self.procedures.contains_key(&proc)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut procedures: Vec<_> = self.procedures.keys().copied().collect();
        procedures.sort_unstable();
        f.debug_struct("Program")
            .field("prog", &self.prog)
            .field("vers", &self.vers)
            .field("procedures", &procedures)
            .finish()
    }
}

/// Routes calls to the programs it serves. Cloning is cheap.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// program number -> version -> procedure table
    programs: Arc<HashMap<u32, BTreeMap<u32, Program>>>,
}

impl Dispatcher {
    /// Builds a dispatcher serving `programs`.
    ///
    /// A later program with the same number and version replaces an earlier one.
    pub fn new(programs: impl IntoIterator<Item = Program>) -> Dispatcher {
        let mut table: HashMap<u32, BTreeMap<u32, Program>> = HashMap::new();
        for program in programs {
            table.entry(program.prog).or_default().insert(program.vers, program);
        }
        Dispatcher { programs: Arc::new(table) }
    }

    /// Lowest and highest version served for `prog`.
    pub fn versions(&self, prog: u32) -> Option<(u32, u32)> {
        let versions = self.programs.get(&prog)?;
        Some((*versions.keys().next()?, *versions.keys().next_back()?))
    }

    /// Processes one complete record.
    ///
    /// # Returns
    ///
    /// The encoded reply record, or `None` when the record is not a call
    /// that can be answered (a REPLY, or a header that does not decode).
    ///
    /// # Panics
    ///
    /// Panics when the handler builds a reply its procedure may not send, or
    /// one that cannot be encoded. Both are bugs in the handler.
    pub async fn dispatch(
        &self,
        record: &[u8],
        conn: &ConnectionContext,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        let mut src = record;
        let msg = match deserialize::<rpc_msg>(&mut src) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Dropping undecodable RPC message from {}: {}", conn.client_addr, e);
                return Ok(None);
            }
        };
        let xid = msg.xid;
        let rpc_body::CALL(call) = msg.body else {
            warn!("Unexpectedly received a Reply instead of a Call, xid {}", xid);
            return Ok(None);
        };

        if call.rpcvers != RPC_VERSION {
            warn!("Invalid RPC version {} != {}", call.rpcvers, RPC_VERSION);
            return Ok(Some(encode_record(&MismatchReply::new(xid), &())?));
        }

        let Some(versions) = self.programs.get(&call.prog) else {
            warn!("Unknown RPC Program number {}", call.prog);
            return Ok(Some(encode_record(&ProgramUnavailable { xid }, &())?));
        };

        let Some(program) = versions.get(&call.vers) else {
            let (low, high) = self.versions(call.prog).unwrap_or((call.vers, call.vers));
            warn!(
                "Unsupported version {} of program {} (supported {}..={})",
                call.vers, call.prog, low, high
            );
            return Ok(Some(encode_record(&ProgramMismatch { xid, low, high }, &())?));
        };

        if call.proc == 0 {
            trace!("NULL call xid {} to program {}", xid, call.prog);
            return Ok(Some(encode_record(&SuccessHeader { xid }, &())?));
        }

        let Some(handler) = program.procedures.get(&call.proc) else {
            warn!("Unimplemented procedure {} of program {}", call.proc, call.prog);
            return Ok(Some(encode_record(&ProcedureUnavailable { xid }, &())?));
        };

        let ctx = CallContext::new(conn, xid, &call);
        let reply = match handler.start(ctx, src) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Garbage arguments for procedure {} xid {}: {}", call.proc, xid, e);
                return Ok(Some(encode_record(&GarbageArgs { xid }, &())?));
            }
        };
        Ok(Some(reply.await))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.programs.values().flat_map(BTreeMap::values)).finish()
    }
}
