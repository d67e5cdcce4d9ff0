//! Outbound conversion coordinator.

use meridian_bank::BankKeeper;
use meridian_registry::{Permission, RegistryLookup};
use meridian_types::{Address, Coin, Denom};
use tracing::{debug, info};

use crate::events::*;
use crate::precision::convert_for_transfer;
use crate::{EventManager, MsgTransfer, MsgTransferResponse, TransferError, TransferKeeper, MODULE_NAME};

/// Converts high-precision tokens into their counterpart before they are sent.
///
/// Every call runs on a bank branch with its own event scope: either the
/// whole conversion plus the transport send lands, or nothing does.
#[derive(Clone, Debug)]
pub struct ConversionCoordinator<R> {
    registry: R,
    require_export_permission: bool,
}

impl<R: RegistryLookup> ConversionCoordinator<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            require_export_permission: false,
        }
    }

    /// Reject tokens whose entry lacks [`Permission::IbcExport`].
    pub fn with_export_permission(mut self, required: bool) -> Self {
        self.require_export_permission = required;
        self
    }

    pub fn transfer<K: TransferKeeper, B: BankKeeper>(
        &self,
        keeper: &mut K,
        bank: &mut B,
        events: &mut EventManager,
        msg: &MsgTransfer,
    ) -> Result<MsgTransferResponse, TransferError> {
        let entry = self.registry.get_denom(msg.token.denom.as_str());
        if self.require_export_permission
            && !self
                .registry
                .check_denom_permissions(&entry, &[Permission::IbcExport])
        {
            return Err(TransferError::Unauthorized {
                denom: msg.token.denom.to_string(),
                permission: Permission::IbcExport,
            });
        }

        let mut scoped = EventManager::new();
        let mut branch = bank.branch();

        let response = if !entry.has_counterparty() {
            debug!(denom = %msg.token.denom, "no counterparty registered, sending unconverted");
            keeper.send_transfer(&mut branch, &mut scoped, msg)?
        } else {
            let counterpart = self.registry.get_denom(&entry.ibc_counterparty_denom);
            if counterpart.is_empty() {
                return Err(TransferError::MissingCounterpartEntry {
                    denom: entry.denom,
                    counterparty: entry.ibc_counterparty_denom,
                });
            }
            if entry.decimals <= counterpart.decimals {
                debug!(
                    denom = %msg.token.denom,
                    decimals = entry.decimals,
                    counterpart_decimals = counterpart.decimals,
                    "counterpart is not lower precision, sending unconverted"
                );
                keeper.send_transfer(&mut branch, &mut scoped, msg)?
            } else {
                let po = entry.decimals - counterpart.decimals;
                let sender = Address::parse(&msg.sender)?;
                let counterpart_denom = Denom::parse(&counterpart.denom)?;
                let amounts = convert_for_transfer(&msg.token.amount, po);
                if amounts.converted.is_zero() {
                    return Err(TransferError::AmountBelowGranularity {
                        amount: msg.token.amount.to_string(),
                        denom: msg.token.denom.to_string(),
                        po,
                    });
                }

                let deducted = Coin::new(msg.token.denom.clone(), amounts.deducted.clone());
                let converted = Coin::new(counterpart_denom, amounts.converted.clone());
                branch.send_coins_from_account_to_module(&sender, MODULE_NAME, &deducted)?;
                branch.mint_coins(MODULE_NAME, &converted)?;
                branch.send_coins_from_module_to_account(MODULE_NAME, &sender, &converted)?;

                info!(
                    %sender,
                    sent = %deducted,
                    converted = %converted,
                    dust = %amounts.dust(&msg.token.amount),
                    po,
                    "converted tokens for transfer"
                );
                scoped.emit(
                    Event::new(EVENT_TYPE_CONVERT_TRANSFER)
                        .with_attribute(ATTRIBUTE_KEY_MODULE, MODULE_NAME)
                        .with_attribute(ATTRIBUTE_KEY_SENT_AMOUNT, &deducted.amount)
                        .with_attribute(ATTRIBUTE_KEY_SENT_DENOM, &deducted.denom)
                        .with_attribute(ATTRIBUTE_KEY_CONVERT_AMOUNT, &converted.amount)
                        .with_attribute(ATTRIBUTE_KEY_CONVERT_DENOM, &converted.denom),
                );
                keeper.send_transfer(&mut branch, &mut scoped, &msg.with_token(converted))?
            }
        };

        branch.commit();
        events.extend(scoped);
        Ok(response)
    }
}
