#[cfg(test)]
mod key_tests {
    use std::str::FromStr;

    use steem_core::crypto::{PrivateKey, PublicKey, Signature};
    use steem_crypto::Digest;

    use crate::tests::get_private_key;

    #[test]
    fn test_private_key_parsing() {
        let private_key = PrivateKey::from_str("5JumUb1hAA3WWr4gcLqCuKyG7fuXCzPoavTxrr5eFtasRsipA31")
            .expect("Failed to create private key");
        assert_eq!(private_key.to_wif(), "5JumUb1hAA3WWr4gcLqCuKyG7fuXCzPoavTxrr5eFtasRsipA31");

        let from_seed = PrivateKey::from_seed("dez1337_active").expect("Failed to create private key from seed");
        assert_eq!(from_seed.to_wif(), private_key.to_wif());
        assert_eq!(get_private_key("dez1337", "active").to_wif(), private_key.to_wif());
    }

    #[test]
    fn test_public_key_parsing() {
        let public_key = PublicKey::from_str("STM6Do8rZF2rJreX2CzSJBfnsEqM627z4Ktit2JuEyjDrwT9pqMJu")
            .expect("Failed to create public key");
        assert_eq!(
            public_key.to_string(),
            "STM6Do8rZF2rJreX2CzSJBfnsEqM627z4Ktit2JuEyjDrwT9pqMJu"
        );
        assert_eq!(get_private_key("dez1337", "active").public_key().unwrap(), public_key);

        let testnet = public_key.clone().with_prefix("TST");
        assert_eq!(testnet.to_string(), "TST6Do8rZF2rJreX2CzSJBfnsEqM627z4Ktit2JuEyjDrwT9pqMJu");
        assert_eq!(testnet, public_key);
    }

    #[test]
    fn test_signature_round_trip() {
        let key = get_private_key("alice", "active");
        let digest = Digest::hash(b"steem");
        let signature = key.sign_digest(&digest).expect("Failed to sign");
        assert!(signature.is_canonical());
        assert_eq!(signature.recover(&digest).unwrap(), key.public_key().unwrap());

        let parsed = Signature::from_str(&signature.to_string()).expect("Failed to parse signature");
        assert_eq!(parsed, signature);
        assert_eq!(signature.to_string().len(), 130);
    }
}
