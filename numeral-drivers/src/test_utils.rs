use heapless::Vec;
use numeral_hal::I2cBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeI2cError {
    Nack,
    Bus,
}

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub address: u8,
    pub data: Vec<u8, 32>,
}

/// Records every write. Acks only the addresses in `present`.
pub struct FakeI2cBus {
    pub present: Vec<u8, 8>,
    pub transactions: Vec<Transaction, 128>,
    pub fail_writes: bool,
}

impl FakeI2cBus {
    pub fn new() -> Self {
        Self {
            present: Vec::new(),
            transactions: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn with_devices(addresses: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.present = Vec::from_slice(addresses).unwrap();
        bus
    }

    /// Transactions that carried data (everything but probes)
    pub fn writes(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| !t.data.is_empty())
    }

    pub fn write_count(&self) -> usize {
        self.writes().count()
    }

    /// Addresses that were probed, in order
    pub fn probes(&self) -> Vec<u8, 16> {
        self.transactions
            .iter()
            .filter(|t| t.data.is_empty())
            .map(|t| t.address)
            .collect()
    }
}

impl I2cBus for FakeI2cBus {
    type Error = FakeI2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.transactions
            .push(Transaction {
                address,
                data: Vec::from_slice(data).map_err(|_| FakeI2cError::Bus)?,
            })
            .map_err(|_| FakeI2cError::Bus)?;

        if !self.present.contains(&address) {
            return Err(FakeI2cError::Nack);
        }
        if self.fail_writes && !data.is_empty() {
            return Err(FakeI2cError::Bus);
        }
        Ok(())
    }
}
