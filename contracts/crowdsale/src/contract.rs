use crate::errors::Error;
use crate::ledger;
use crate::storage::*;
use crate::types::*;
use crate::whitelist;
use soroban_sdk::{contract, contractimpl, contractmeta, symbol_short, token, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Whitelisted goal-based token crowdsale"
);

#[contract]
pub struct CrowdsaleContract;

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = get_owner(env).ok_or(Error::NotInitialized)?;
    if caller != &owner {
        return Err(Error::NotOwner);
    }
    Ok(())
}

// Terminal-state gate: once finalized, only read-only queries remain.
fn require_not_finalized(env: &Env) -> Result<(), Error> {
    if is_finalized(env) {
        return Err(Error::AlreadyFinalized);
    }
    Ok(())
}

/// Shared purchase path for `buy_tokens` and `deposit`. Precondition
/// order is observable: the first failing check names the rejection.
fn execute_purchase(
    env: &Env,
    buyer: &Address,
    config: &SaleConfig,
    token_amount: u128,
    paid_value: u128,
) -> Result<(), Error> {
    if !whitelist::is_whitelisted(env, buyer) {
        return Err(Error::NotWhitelisted);
    }

    let now = get_ledger_timestamp(env);
    if now < config.start_time {
        return Err(Error::SaleNotOpen);
    }
    if now > config.end_time {
        return Err(Error::SaleClosed);
    }

    if token_amount < MIN_PURCHASE {
        return Err(Error::BelowMinimum);
    }
    if token_amount > MAX_PURCHASE {
        return Err(Error::AboveMaximum);
    }

    // Exact payment only; over- and under-payment are both rejected
    // and no change is given. An owner-set price large enough to
    // overflow the expected value can never be matched.
    let expected = token_amount
        .checked_mul(config.price_per_token)
        .ok_or(Error::InsufficientPayment)?;
    if paid_value != expected {
        return Err(Error::InsufficientPayment);
    }

    let sold = get_tokens_sold(env);
    if sold + token_amount > config.max_tokens {
        return Err(Error::SupplyExceeded);
    }

    // Pull the payment in, then deliver the tokens. A failed transfer
    // traps and the host reverts every effect of this invocation.
    let payment = token::Client::new(env, &config.payment_token);
    payment.transfer(
        buyer,
        &env.current_contract_address(),
        &(paid_value as i128),
    );

    let sale_token = token::Client::new(env, &config.token);
    sale_token.transfer(
        &env.current_contract_address(),
        buyer,
        &(token_amount as i128),
    );

    set_tokens_sold(env, sold + token_amount);
    set_raised(env, get_raised(env) + paid_value);
    ledger::record(env, buyer, paid_value);

    env.events()
        .publish((symbol_short!("buy"),), (token_amount, buyer.clone()));

    Ok(())
}

#[contractimpl]
impl CrowdsaleContract {
    /// Set up the sale. Called exactly once; the sale token allocation
    /// is expected to be transferred to this contract separately.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        payment_token: Address,
        price_per_token: u128,
        max_tokens: u128,
        goal: u128,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        if price_per_token == 0 || max_tokens == 0 || start_time >= end_time {
            return Err(Error::InvalidConfig);
        }

        let config = SaleConfig {
            token: token.clone(),
            payment_token,
            price_per_token,
            max_tokens,
            goal,
            start_time,
            end_time,
        };

        set_config(&env, &config);
        set_owner(&env, &owner);
        set_tokens_sold(&env, 0);
        set_raised(&env, 0);
        set_finalized(&env, false);

        env.events().publish(
            (symbol_short!("init"),),
            (token, price_per_token, max_tokens, goal),
        );

        Ok(())
    }

    /// Permit `addr` to purchase. Idempotent.
    pub fn add_to_whitelist(env: Env, caller: Address, addr: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        require_not_finalized(&env)?;
        whitelist::add(&env, &addr);
        Ok(())
    }

    /// Revoke purchase permission. Removing a non-member is a no-op.
    pub fn remove_from_whitelist(env: Env, caller: Address, addr: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        require_not_finalized(&env)?;
        whitelist::remove(&env, &addr);
        Ok(())
    }

    pub fn is_whitelisted(env: Env, addr: Address) -> bool {
        whitelist::is_whitelisted(&env, &addr)
    }

    /// Buy `token_amount` whole tokens for exactly
    /// `token_amount * price_per_token` payment units.
    pub fn buy_tokens(
        env: Env,
        buyer: Address,
        token_amount: u128,
        paid_value: u128,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        require_not_finalized(&env)?;
        execute_purchase(&env, &buyer, &config, token_amount, paid_value)
    }

    /// Bare-payment purchase: the token amount is derived from the
    /// payment at the current price. Returns the derived amount.
    pub fn deposit(env: Env, buyer: Address, paid_value: u128) -> Result<u128, Error> {
        buyer.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        require_not_finalized(&env)?;

        // The owner may set any price, including zero; guard the division.
        if config.price_per_token == 0 {
            return Err(Error::InsufficientPayment);
        }
        let token_amount = paid_value / config.price_per_token;

        execute_purchase(&env, &buyer, &config, token_amount, paid_value)?;
        Ok(token_amount)
    }

    /// Set the price, unconditionally. No bounds check on the value.
    pub fn set_price(env: Env, caller: Address, new_price: u128) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        require_not_finalized(&env)?;

        let mut config = get_config(&env).ok_or(Error::NotInitialized)?;
        config.price_per_token = new_price;
        set_config(&env, &config);
        Ok(())
    }

    /// Move the sale opening, before or after purchases have occurred.
    pub fn set_start_time(env: Env, caller: Address, new_start: u64) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        require_not_finalized(&env)?;

        let mut config = get_config(&env).ok_or(Error::NotInitialized)?;
        config.start_time = new_start;
        set_config(&env, &config);
        Ok(())
    }

    /// Reclaim the caller's contribution after a sale that closed below
    /// its goal. Returns the refunded amount; a caller with nothing
    /// outstanding gets zero back and this is not an error.
    ///
    /// Tokens already delivered are kept; only the payment comes back.
    pub fn claim_refund(env: Env, caller: Address) -> Result<u128, Error> {
        caller.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        require_not_finalized(&env)?;

        let now = get_ledger_timestamp(&env);
        if now <= config.end_time {
            return Err(Error::SaleStillOngoing);
        }
        if get_raised(&env) >= config.goal {
            return Err(Error::GoalReached);
        }

        let amount = ledger::clear(&env, &caller);
        if amount > 0 {
            set_raised(&env, get_raised(&env) - amount);

            let payment = token::Client::new(&env, &config.payment_token);
            payment.transfer(&env.current_contract_address(), &caller, &(amount as i128));

            env.events()
                .publish((symbol_short!("refund"),), (caller, amount));
        }

        Ok(amount)
    }

    /// One-time closing action: sweeps the remaining sale-token and
    /// payment-token balances to the owner. Permitted whether or not
    /// the goal was met; doing so permanently blocks refunds.
    pub fn finalize(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        require_not_finalized(&env)?;

        set_finalized(&env, true);

        let sale_token = token::Client::new(&env, &config.token);
        let remaining = sale_token.balance(&env.current_contract_address());
        if remaining > 0 {
            sale_token.transfer(&env.current_contract_address(), &caller, &remaining);
        }

        let payment = token::Client::new(&env, &config.payment_token);
        let proceeds = payment.balance(&env.current_contract_address());
        if proceeds > 0 {
            payment.transfer(&env.current_contract_address(), &caller, &proceeds);
        }

        env.events().publish(
            (symbol_short!("finalize"),),
            (get_tokens_sold(&env), get_raised(&env)),
        );

        Ok(())
    }

    // View functions

    pub fn price(env: Env) -> Result<u128, Error> {
        Ok(get_config(&env)
            .ok_or(Error::NotInitialized)?
            .price_per_token)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.token)
    }

    pub fn payment_token(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.payment_token)
    }

    pub fn goal(env: Env) -> Result<u128, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.goal)
    }

    pub fn start_time(env: Env) -> Result<u64, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.end_time)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        get_owner(&env).ok_or(Error::NotInitialized)
    }

    pub fn tokens_sold(env: Env) -> u128 {
        get_tokens_sold(&env)
    }

    pub fn total_raised(env: Env) -> u128 {
        get_raised(&env)
    }

    pub fn is_finalized(env: Env) -> bool {
        is_finalized(&env)
    }

    pub fn contribution(env: Env, addr: Address) -> u128 {
        ledger::outstanding(&env, &addr)
    }

    pub fn status(env: Env) -> Result<SaleStatus, Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        if is_finalized(&env) {
            return Ok(SaleStatus::Finalized);
        }

        let now = get_ledger_timestamp(&env);
        if now < config.start_time {
            Ok(SaleStatus::Pending)
        } else if now <= config.end_time {
            Ok(SaleStatus::Active)
        } else if get_raised(&env) >= config.goal {
            Ok(SaleStatus::Succeeded)
        } else {
            Ok(SaleStatus::Refundable)
        }
    }
}
