//! Shared setup for the integration tests.

#![allow(dead_code)]

pub mod insecure;

use ledger_guard::{GuardError, ID};
use solana_program_test::{processor, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::{Account, AccountSharedData},
    instruction::{Instruction, InstructionError},
    message::Message,
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signer},
    system_program,
    transaction::{Transaction, TransactionError},
};

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub struct TestContext {
    pub context: ProgramTestContext,
}

impl TestContext {
    /// Bank with the ledger program and the insecure fixture registered
    /// as native processors.
    pub async fn new() -> Self {
        let mut program_test = ProgramTest::new(
            "ledger_guard",
            ID,
            processor!(ledger_guard::processor::process_instruction),
        );
        program_test.add_program(
            "insecure_ledger",
            insecure::ID,
            processor!(insecure::process_instruction),
        );
        program_test.prefer_bpf(false);

        Self {
            context: program_test.start_with_context().await,
        }
    }

    /// A new system-owned wallet holding `sol` SOL.
    pub fn funded_wallet(&mut self, sol: u64) -> Keypair {
        let wallet = Keypair::new();
        let account = AccountSharedData::new(sol * LAMPORTS_PER_SOL, 0, &system_program::id());
        self.context.set_account(&wallet.pubkey(), &account);
        wallet
    }

    /// Writes `account` at `key` directly, bypassing every program.
    pub fn set_account(&mut self, key: &Pubkey, account: Account) {
        self.context.set_account(key, &AccountSharedData::from(account));
    }

    /// Adds lamports to whatever is stored at `key`.
    pub async fn fund(&mut self, key: &Pubkey, lamports: u64) {
        let mut account = self.account(key).await.unwrap_or_else(|| Account {
            owner: system_program::id(),
            ..Account::default()
        });
        account.lamports += lamports;
        self.set_account(key, account);
    }

    /// Signs and executes `instructions` in one transaction. The context
    /// payer covers fees; `signers` not named by the instructions are left
    /// out.
    pub async fn send(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), TransactionError> {
        self.send_with_return_data(instructions, signers)
            .await
            .map(|_| ())
    }

    /// Like [`TestContext::send`] but also yields the transaction's return
    /// data, if any program set it.
    pub async fn send_with_return_data(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        // A fresh blockhash keeps a repeated transaction from being
        // deduplicated as already processed.
        let blockhash = self.context.get_new_latest_blockhash().await.unwrap();
        let payer = &self.context.payer;
        let message = Message::new(instructions, Some(&payer.pubkey()));
        let required = &message.account_keys[..message.header.num_required_signatures as usize];

        let mut keypairs: Vec<&Keypair> = vec![payer];
        keypairs.extend(
            signers
                .iter()
                .copied()
                .filter(|kp| kp.pubkey() != payer.pubkey() && required.contains(&kp.pubkey())),
        );
        let tx = Transaction::new(&keypairs[..], message, blockhash);

        let outcome = self
            .context
            .banks_client
            .process_transaction_with_metadata(tx)
            .await
            .unwrap();
        outcome.result?;
        Ok(outcome
            .metadata
            .and_then(|meta| meta.return_data)
            .map(|return_data| return_data.data))
    }

    pub async fn account(&mut self, key: &Pubkey) -> Option<Account> {
        self.context.banks_client.get_account(*key).await.unwrap()
    }

    pub async fn lamports(&mut self, key: &Pubkey) -> u64 {
        self.account(key).await.map_or(0, |account| account.lamports)
    }

    pub async fn snapshot(&mut self, keys: &[Pubkey]) -> Vec<Option<Account>> {
        let mut accounts = Vec::with_capacity(keys.len());
        for key in keys {
            accounts.push(self.account(key).await);
        }
        accounts
    }

    pub async fn rent(&mut self) -> Rent {
        self.context.banks_client.get_rent().await.unwrap()
    }
}

/// Decodes a little-endian `u64` from transaction return data. The bank
/// strips trailing zero bytes, so a missing or short buffer is zero-padded.
pub fn return_u64(data: Option<Vec<u8>>) -> u64 {
    let mut bytes = [0u8; 8];
    if let Some(data) = data {
        bytes[..data.len()].copy_from_slice(&data);
    }
    u64::from_le_bytes(bytes)
}

/// The program error carried by a failed transaction, if it is one of ours.
pub fn guard_error(err: &TransactionError) -> Option<GuardError> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            GuardError::from_code(*code)
        }
        _ => None,
    }
}

/// Asserts a transaction was rejected by the program with `expected`.
pub fn assert_guard_error<T: std::fmt::Debug>(
    result: Result<T, TransactionError>,
    expected: GuardError,
) {
    match result {
        Err(err) => assert_eq!(guard_error(&err), Some(expected), "got {err:?}"),
        Ok(_) => panic!("expected {expected:?}, transaction succeeded"),
    }
}
