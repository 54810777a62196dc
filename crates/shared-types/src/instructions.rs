//! # Instructions
//!
//! Ledger instructions and the executable that carries them in a
//! transaction.

use crate::entities::{Domain, DomainId, NewDomain};
use serde::{Deserialize, Serialize};

/// An object that can be registered on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifiableBox {
    /// Descriptor of a domain to create.
    NewDomain(NewDomain),
    /// An existing domain record.
    Domain(Domain),
}

impl IdentifiableBox {
    /// Short variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            IdentifiableBox::NewDomain(_) => "NewDomain",
            IdentifiableBox::Domain(_) => "Domain",
        }
    }
}

/// Register an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBox {
    /// The object to register.
    pub object: IdentifiableBox,
}

impl RegisterBox {
    /// Register a new domain.
    pub fn domain(new_domain: NewDomain) -> Self {
        Self {
            object: IdentifiableBox::NewDomain(new_domain),
        }
    }
}

/// A single ledger instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Register an object.
    Register(RegisterBox),
}

impl Instruction {
    /// Domain this instruction would create, if any.
    pub fn registered_domain(&self) -> Option<&DomainId> {
        match self {
            Instruction::Register(RegisterBox {
                object: IdentifiableBox::NewDomain(new_domain),
            }) => Some(&new_domain.id),
            Instruction::Register(_) => None,
        }
    }
}

/// What a transaction executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Executable {
    /// An ordered list of instructions, applied atomically.
    Instructions(Vec<Instruction>),
}

impl Executable {
    /// Wrap a single instruction.
    pub fn single(instruction: Instruction) -> Self {
        Executable::Instructions(vec![instruction])
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        match self {
            Executable::Instructions(instructions) => instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_domain_instruction() {
        let id: DomainId = "looking_glass".parse().unwrap();
        let instruction = Instruction::Register(RegisterBox::domain(NewDomain::new(id.clone())));
        assert_eq!(instruction.registered_domain(), Some(&id));

        let executable = Executable::single(instruction);
        assert_eq!(executable.instructions().len(), 1);
    }

    #[test]
    fn test_register_existing_domain_record_is_not_a_creation() {
        let domain = Domain::from(NewDomain::new("wonderland".parse().unwrap()));
        let instruction = Instruction::Register(RegisterBox {
            object: IdentifiableBox::Domain(domain),
        });
        assert_eq!(instruction.registered_domain(), None);
    }

    #[test]
    fn test_executable_json_shape() {
        let executable = Executable::single(Instruction::Register(RegisterBox::domain(
            NewDomain::new("looking_glass".parse().unwrap()),
        )));
        let json = serde_json::to_value(&executable).unwrap();
        assert_eq!(
            json["Instructions"][0]["Register"]["object"]["NewDomain"]["id"]["name"],
            "looking_glass"
        );
    }
}
