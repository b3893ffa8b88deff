//! The chart of accounts
//!
//! An [`AccountForest`] owns one tree per hierarchy. Accounts are attached
//! under the parent implied by their number (see [`hierarchy`]); postings
//! made through the forest cascade their effect to every ancestor, while
//! postings replayed from the log only restore history.

pub mod clock;
pub mod hierarchy;
pub mod node;

pub use clock::{Clock, FixedClock, PostingIdGenerator, SequentialIds, SystemClock, TimestampIds};
pub use node::{ChartArena, Children, ForestNode, NodeId};

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, AccountRecord, Direction, Money, Posting, PostingId};
use crate::storage::text;

/// Outcome of reading an account source or posting log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines that produced an account or posting
    pub loaded: usize,
    /// Lines that were malformed or rejected
    pub skipped: usize,
}

/// Tree state captured by [`AccountForest::checkpoint`]
#[derive(Debug, Clone)]
pub struct ForestCheckpoint {
    arena: ChartArena,
    roots: Vec<NodeId>,
}

/// A multi-root chart of accounts
#[derive(Debug)]
pub struct AccountForest {
    arena: ChartArena,
    roots: Vec<NodeId>,
    clock: Box<dyn Clock>,
    ids: Box<dyn PostingIdGenerator>,
}

impl Default for AccountForest {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountForest {
    /// Empty forest using wall-clock dates and timestamp posting ids
    pub fn new() -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(TimestampIds::default()))
    }

    /// Empty forest with injected date and id sources
    pub fn with_sources(clock: Box<dyn Clock>, ids: Box<dyn PostingIdGenerator>) -> Self {
        Self {
            arena: ChartArena::new(),
            roots: Vec::new(),
            clock,
            ids,
        }
    }

    /// Discard every tree
    pub fn reset(&mut self) {
        self.roots.clear();
        self.arena.clear();
    }

    /// Copy of every tree, for rolling back a change that could not be kept
    pub fn checkpoint(&self) -> ForestCheckpoint {
        ForestCheckpoint {
            arena: self.arena.clone(),
            roots: self.roots.clone(),
        }
    }

    /// Return to the state captured by `checkpoint`
    pub fn restore(&mut self, checkpoint: ForestCheckpoint) {
        self.arena = checkpoint.arena;
        self.roots = checkpoint.roots;
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of accounts
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Root nodes ordered by account number
    fn sorted_roots(&self) -> Vec<NodeId> {
        let mut roots = self.roots.clone();
        roots.sort_by_key(|root| self.arena.node(*root).number());
        roots
    }

    /// Find an account's node together with the root of its tree
    fn locate(&self, number: AccountNumber) -> Option<(NodeId, NodeId)> {
        self.roots.iter().find_map(|root| {
            self.arena
                .find_by_id(Some(*root), number)
                .map(|node| (*root, node))
        })
    }

    fn locate_or_err(&self, number: AccountNumber) -> LedgerResult<(NodeId, NodeId)> {
        self.locate(number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Find an account's node, searching each root's tree in root order
    pub fn find_account(&self, number: impl Into<AccountNumber>) -> Option<NodeId> {
        self.locate(number.into()).map(|(_, node)| node)
    }

    /// Find an account's record
    pub fn account(&self, number: impl Into<AccountNumber>) -> Option<&AccountRecord> {
        self.find_account(number).map(|node| self.arena.record(node))
    }

    /// Depth of an account below the root of its tree
    pub fn level_of(&self, number: impl Into<AccountNumber>) -> Option<usize> {
        let (root, node) = self.locate(number.into())?;
        self.arena.level(root, node)
    }

    /// Direct children of an account, ascending
    pub fn children_of(&self, number: impl Into<AccountNumber>) -> Vec<&AccountRecord> {
        match self.find_account(number) {
            Some(node) => self
                .arena
                .children(node)
                .map(|child| self.arena.record(child))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Detached copy of an account and its descendants
    pub fn subtree_snapshot(
        &self,
        number: impl Into<AccountNumber>,
    ) -> LedgerResult<(ChartArena, NodeId)> {
        let (_, node) = self.locate_or_err(number.into())?;
        Ok(self.arena.copy_subtree(node))
    }

    /// Add an account.
    ///
    /// With no parent the account becomes a new root. With a parent, the
    /// account is attached below it; when that parent does not exist the
    /// nearest existing ancestor is used instead, which must still sit
    /// exactly one level above the new account.
    pub fn add_account(
        &mut self,
        record: AccountRecord,
        parent: Option<AccountNumber>,
    ) -> LedgerResult<NodeId> {
        record
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let number = record.number;
        if self.locate(number).is_some() {
            return Err(LedgerError::Duplicate {
                number: number.get(),
            });
        }

        let Some(parent) = parent else {
            let id = self.arena.alloc(record);
            self.roots.push(id);
            debug!(account = %number, "added root account");
            return Ok(id);
        };

        let (root, anchor) = match self.locate(parent) {
            Some(found) => found,
            None => hierarchy::ancestor_candidates(number)
                .into_iter()
                .find_map(|candidate| self.locate(candidate))
                .ok_or_else(|| {
                    LedgerError::invalid_parent(
                        number.get(),
                        format!("neither {} nor any of its ancestors exists", parent),
                    )
                })?,
        };

        let anchor_number = self.arena.node(anchor).number();
        if anchor_number != parent {
            debug!(account = %number, requested = %parent, anchor = %anchor_number, "parent missing, using nearest ancestor");
        }
        if !hierarchy::is_direct_child(anchor_number, number) {
            return Err(LedgerError::invalid_parent(
                number.get(),
                format!("{} is not exactly one level above {}", anchor_number, number),
            ));
        }

        self.arena.attach_account(root, record)
    }

    /// Post a transaction to an account and cascade it to its ancestors
    pub fn post_transaction(
        &mut self,
        number: impl Into<AccountNumber>,
        amount: Money,
        direction: Direction,
    ) -> LedgerResult<PostingId> {
        self.post_transaction_with_memo(number, amount, direction, "")
    }

    /// Post a transaction carrying a memo
    pub fn post_transaction_with_memo(
        &mut self,
        number: impl Into<AccountNumber>,
        amount: Money,
        direction: Direction,
        memo: impl Into<String>,
    ) -> LedgerResult<PostingId> {
        let (root, node) = self.locate_or_err(number.into())?;

        let id = self.ids.next_id(self.clock.now());
        let posting = Posting::with_memo(id.clone(), amount, direction, self.clock.today(), memo);
        self.arena.post_and_propagate(root, node, posting)?;

        Ok(id)
    }

    /// Remove the posting at `index`, reversing its effect on the account
    /// and its ancestors
    pub fn delete_transaction(
        &mut self,
        number: impl Into<AccountNumber>,
        index: usize,
    ) -> LedgerResult<Posting> {
        let number = number.into();
        let (root, node) = self.locate_or_err(number)?;

        let inverse = self
            .arena
            .record(node)
            .posting(index)
            .map(Posting::inverse)
            .ok_or_else(|| LedgerError::posting_not_found(number, index))?;

        self.arena.propagate(root, node, inverse.signed_amount())?;
        let removed = self
            .arena
            .record_mut(node)
            .take_posting(index)
            .ok_or_else(|| LedgerError::posting_not_found(number, index))?;

        debug!(account = %number, posting = %removed.id, "deleted posting");
        Ok(removed)
    }

    /// Change the amount and direction of the posting at `index`. Returns
    /// the posting as it was before the change.
    pub fn amend_transaction(
        &mut self,
        number: impl Into<AccountNumber>,
        index: usize,
        amount: Money,
        direction: Direction,
    ) -> LedgerResult<Posting> {
        let number = number.into();
        let (root, node) = self.locate_or_err(number)?;

        let previous = self
            .arena
            .record(node)
            .posting(index)
            .cloned()
            .ok_or_else(|| LedgerError::posting_not_found(number, index))?;

        let mut amended = previous.clone();
        amended.set_amount(amount);
        amended.direction = direction;

        let delta = amended
            .signed_amount()
            .checked_sub(previous.signed_amount())
            .ok_or(LedgerError::BalanceOverflow {
                number: number.get(),
            })?;
        self.arena.propagate(root, node, delta)?;
        self.arena.record_mut(node).replace_posting(index, amended);

        debug!(account = %number, posting = %previous.id, %delta, "amended posting");
        Ok(previous)
    }

    /// Every account depth-first, ids ascending, with its level
    pub fn accounts(&self) -> impl Iterator<Item = (usize, &AccountRecord)> + '_ {
        self.sorted_roots()
            .into_iter()
            .flat_map(move |root| self.arena.preorder(root))
            .map(move |(level, node)| (level, self.arena.record(node)))
    }

    /// Indented listing of every account and its balance
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (level, record) in self.accounts() {
            out.push_str(&"  ".repeat(level));
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Parent implied by an account number alone: `None` for a single-digit
    /// number, or for a hierarchy head (`2000`) with no direct parent present
    pub fn default_parent(&self, number: AccountNumber) -> Option<AccountNumber> {
        let implied = hierarchy::implied_parent(number)?;
        let has_direct_parent = hierarchy::parent_candidates(number)
            .into_iter()
            .any(|candidate| self.locate(candidate).is_some());

        if hierarchy::is_hierarchy_head(number) && !has_direct_parent {
            None
        } else {
            Some(implied)
        }
    }

    /// Read accounts from an account source, in file order. Malformed or
    /// rejected lines are skipped with a warning.
    pub fn load_from_source<R: BufRead>(&mut self, reader: R) -> LedgerResult<LoadSummary> {
        let mut summary = LoadSummary::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let record = match text::parse_account_line(line_no, &line) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "skipping account line");
                    summary.skipped += 1;
                    continue;
                }
            };

            let parent = self.default_parent(record.number);
            match self.add_account(record, parent) {
                Ok(_) => summary.loaded += 1,
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping account");
                    summary.skipped += 1;
                }
            }
        }

        debug!(loaded = summary.loaded, skipped = summary.skipped, "loaded accounts");
        Ok(summary)
    }

    /// Replay postings from a posting log. Balances are not touched.
    pub fn load_postings<R: BufRead>(&mut self, reader: R) -> LedgerResult<LoadSummary> {
        let mut summary = LoadSummary::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let (number, posting) = match text::parse_posting_line(line_no, &line) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "skipping posting line");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.find_account(number) {
                Some(node) => {
                    self.arena.record_mut(node).replay_posting(posting);
                    summary.loaded += 1;
                }
                None => {
                    warn!(line = line_no, account = %number, "skipping posting for unknown account");
                    summary.skipped += 1;
                }
            }
        }

        debug!(loaded = summary.loaded, skipped = summary.skipped, "loaded postings");
        Ok(summary)
    }

    /// Write every account, parents before children
    pub fn save_to_source<W: Write>(&self, mut writer: W) -> LedgerResult<()> {
        for (_, record) in self.accounts() {
            writeln!(writer, "{}", text::format_account_line(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write every posting of every account
    pub fn save_postings<W: Write>(&self, mut writer: W) -> LedgerResult<()> {
        for (_, record) in self.accounts() {
            for posting in record.postings() {
                writeln!(writer, "{}", text::format_posting_line(record.number, posting))?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
