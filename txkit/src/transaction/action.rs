//! Actions: the individual state changes a transaction carries.
//!
//! The set is closed. Variant order is the on-wire discriminant and must
//! not be rearranged:
//!
//! ```text
//! 0 CreateAccount   1 DeployContract   2 FunctionCall   3 Transfer
//! 4 Stake           5 AddKey           6 DeleteKey      7 DeleteAccount
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::types::{AccountId, Balance, Gas, Nonce};
use crate::config::DEFAULT_FUNCTION_CALL_GAS;
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One operation inside a transaction. Actions execute in order against the
/// transaction's receiver account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum Action {
    /// Create the receiver account. No payload.
    CreateAccount,
    DeployContract(DeployContractAction),
    FunctionCall(FunctionCallAction),
    Transfer(TransferAction),
    Stake(StakeAction),
    AddKey(AddKeyAction),
    DeleteKey(DeleteKeyAction),
    DeleteAccount(DeleteAccountAction),
}

/// Deploy WASM bytecode to the receiver account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct DeployContractAction {
    pub code: Vec<u8>,
}

/// Call a contract method.
///
/// Built with the fluent setters:
///
/// ```
/// use txkit::transaction::action::{Action, FunctionCallAction};
/// use txkit::transaction::types::Balance;
///
/// let call = FunctionCallAction::new("ft_transfer")
///     .args_json(&serde_json::json!({"receiver_id": "bob.testnet", "amount": "5"}))
///     .unwrap()
///     .deposit(Balance::from_yocto(1));
/// let action: Action = call.into();
/// assert!(matches!(action, Action::FunctionCall(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct FunctionCallAction {
    pub method_name: String,
    pub args: Vec<u8>,
    pub gas: Gas,
    pub deposit: Balance,
}

impl FunctionCallAction {
    /// A call to `method_name` with empty arguments, 30 TGas and no deposit.
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            args: Vec::new(),
            gas: DEFAULT_FUNCTION_CALL_GAS,
            deposit: Balance::ZERO,
        }
    }

    /// Raw argument bytes.
    pub fn args(mut self, args: Vec<u8>) -> Self {
        self.args = args;
        self
    }

    /// Arguments serialized as JSON, the convention for most contracts.
    pub fn args_json<T: Serialize + ?Sized>(mut self, args: &T) -> Result<Self, serde_json::Error> {
        self.args = serde_json::to_vec(args)?;
        Ok(self)
    }

    pub fn gas(mut self, gas: Gas) -> Self {
        self.gas = gas;
        self
    }

    pub fn deposit(mut self, deposit: Balance) -> Self {
        self.deposit = deposit;
        self
    }
}

/// Move `deposit` from signer to receiver.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TransferAction {
    pub deposit: Balance,
}

/// Lock `stake` for validation under `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct StakeAction {
    pub stake: Balance,
    pub public_key: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct AddKeyAction {
    pub public_key: PublicKey,
    pub access_key: AccessKey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct DeleteKeyAction {
    pub public_key: PublicKey,
}

/// Delete the receiver account, sending its remaining balance to
/// `beneficiary_id`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct DeleteAccountAction {
    pub beneficiary_id: AccountId,
}

impl Action {
    pub fn create_account() -> Self {
        Action::CreateAccount
    }

    pub fn deploy_contract(code: Vec<u8>) -> Self {
        Action::DeployContract(DeployContractAction { code })
    }

    /// Shorthand for a call with raw args, explicit gas and deposit. Use
    /// [`FunctionCallAction::new`] for the builder form.
    pub fn function_call(
        method_name: impl Into<String>,
        args: Vec<u8>,
        gas: Gas,
        deposit: Balance,
    ) -> Self {
        Action::FunctionCall(FunctionCallAction {
            method_name: method_name.into(),
            args,
            gas,
            deposit,
        })
    }

    pub fn transfer(deposit: Balance) -> Self {
        Action::Transfer(TransferAction { deposit })
    }

    pub fn stake(stake: Balance, public_key: PublicKey) -> Self {
        Action::Stake(StakeAction { stake, public_key })
    }

    pub fn add_key(public_key: PublicKey, access_key: AccessKey) -> Self {
        Action::AddKey(AddKeyAction {
            public_key,
            access_key,
        })
    }

    pub fn delete_key(public_key: PublicKey) -> Self {
        Action::DeleteKey(DeleteKeyAction { public_key })
    }

    pub fn delete_account(beneficiary_id: impl Into<AccountId>) -> Self {
        Action::DeleteAccount(DeleteAccountAction {
            beneficiary_id: beneficiary_id.into(),
        })
    }

    /// Variant name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::CreateAccount => "CreateAccount",
            Action::DeployContract(_) => "DeployContract",
            Action::FunctionCall(_) => "FunctionCall",
            Action::Transfer(_) => "Transfer",
            Action::Stake(_) => "Stake",
            Action::AddKey(_) => "AddKey",
            Action::DeleteKey(_) => "DeleteKey",
            Action::DeleteAccount(_) => "DeleteAccount",
        }
    }
}

impl From<FunctionCallAction> for Action {
    fn from(call: FunctionCallAction) -> Self {
        Action::FunctionCall(call)
    }
}

// ---------------------------------------------------------------------------
// Access keys
// ---------------------------------------------------------------------------

/// An access key as stored on an account.
///
/// The nonce is the last nonce the key has used. Transactions signed with
/// the key must use a strictly larger one.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct AccessKey {
    pub nonce: Nonce,
    pub permission: AccessKeyPermission,
}

impl AccessKey {
    /// A fresh key with unrestricted access.
    pub fn full_access() -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FullAccess,
        }
    }

    /// A fresh key limited to calling `method_names` on `receiver_id`
    /// (an empty list means any method), paying fees from `allowance`
    /// (`None` means unlimited).
    pub fn function_call(
        allowance: Option<Balance>,
        receiver_id: impl Into<AccountId>,
        method_names: Vec<String>,
    ) -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FunctionCall(FunctionCallPermission {
                allowance,
                receiver_id: receiver_id.into(),
                method_names,
            }),
        }
    }
}

/// What an access key may do. `FunctionCall` is variant 0, `FullAccess`
/// variant 1.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum AccessKeyPermission {
    FunctionCall(FunctionCallPermission),
    FullAccess,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct FunctionCallPermission {
    pub allowance: Option<Balance>,
    pub receiver_id: AccountId,
    pub method_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
