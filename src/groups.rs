//! The pre-agreed safe-prime groups of RFC 5054 Appendix A, plus custom groups.
//!
//! The hex digits below are part of the wire contract and must stay verbatim;
//! both sides hash N and g into the multiplier `k` and the client proof `M1`,
//! so a single flipped digit silently breaks authentication.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::primitives::{Generator, PrimeModulus};
use crate::{Result, Srp6Error};

/// Identifies one of the seven vetted (N, g) pairs of RFC 5054 Appendix A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupId {
    N512,
    N768,
    N1024,
    N2048,
    N3072,
    N4096,
    N8192,
}

/// All constants here were pulled from Appendix A of RFC 5054
const STANDARD_GROUPS: [(&str, &str); 7] = [
    (
        /* 512 */
        "D66AAFE8E245F9AC245A199F62CE61AB8FA90A4D80C71CD2ADFD0B9DA163B29F2A34AFBDB3B\
         1B5D0102559CE63D8B6E86B0AA59C14E79D4AA62D1748E4249DF3",
        "2",
    ),
    (
        /* 768 */
        "B344C7C4F8C495031BB4E04FF8F84EE95008163940B9558276744D91F7CC9F402653BE7147F\
         00F576B93754BCDDF71B636F2099E6FFF90E79575F3D0DE694AFF737D9BE9713CEF8D837ADA\
         6380B1093E94B6A529A8C6C2BE33E0867C60C3262B",
        "2",
    ),
    (
        /* 1024 */
        "EEAF0AB9ADB38DD69C33F80AFA8FC5E86072618775FF3C0B9EA2314C9C256576D674DF7496\
         EA81D3383B4813D692C6E0E0D5D8E250B98BE48E495C1D6089DAD15DC7D7B46154D6B6CE8E\
         F4AD69B15D4982559B297BCF1885C529F566660E57EC68EDBC3C05726CC02FD4CBF4976EAA\
         9AFD5138FE8376435B9FC61D2FC0EB06E3",
        "2",
    ),
    (
        /* 2048 */
        "AC6BDB41324A9A9BF166DE5E1389582FAF72B6651987EE07FC3192943DB56050A37329CBB4\
         A099ED8193E0757767A13DD52312AB4B03310DCD7F48A9DA04FD50E8083969EDB767B0CF60\
         95179A163AB3661A05FBD5FAAAE82918A9962F0B93B855F97993EC975EEAA80D740ADBF4FF\
         747359D041D5C33EA71D281E446B14773BCA97B43A23FB801676BD207A436C6481F1D2B907\
         8717461A5B9D32E688F87748544523B524B0D57D5EA77A2775D2ECFA032CFBDBF52FB37861\
         60279004E57AE6AF874E7303CE53299CCC041C7BC308D82A5698F3A8D0C38271AE35F8E9DB\
         FBB694B5C803D89F7AE435DE236D525F54759B65E372FCD68EF20FA7111F9E4AFF73",
        "2",
    ),
    (
        /* 3072 */
        "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E08\
         8A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B\
         302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9\
         A637ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE6\
         49286651ECE45B3DC2007CB8A163BF0598DA48361C55D39A69163FA8\
         FD24CF5F83655D23DCA3AD961C62F356208552BB9ED529077096966D\
         670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C\
         180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
         3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D\
         04507A33A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7D\
         B3970F85A6E1E4C7ABF5AE8CDB0933D71E8C94E04A25619DCEE3D226\
         1AD2EE6BF12FFA06D98A0864D87602733EC86A64521F2B18177B200C\
         BBE117577A615D6C770988C0BAD946E208E24FA074E5AB3143DB5BFC\
         E0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF",
        "5",
    ),
    (
        /* 4096 */
        "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E08\
         8A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B\
         302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9\
         A637ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE6\
         49286651ECE45B3DC2007CB8A163BF0598DA48361C55D39A69163FA8\
         FD24CF5F83655D23DCA3AD961C62F356208552BB9ED529077096966D\
         670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C\
         180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
         3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D\
         04507A33A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7D\
         B3970F85A6E1E4C7ABF5AE8CDB0933D71E8C94E04A25619DCEE3D226\
         1AD2EE6BF12FFA06D98A0864D87602733EC86A64521F2B18177B200C\
         BBE117577A615D6C770988C0BAD946E208E24FA074E5AB3143DB5BFC\
         E0FD108E4B82D120A92108011A723C12A787E6D788719A10BDBA5B26\
         99C327186AF4E23C1A946834B6150BDA2583E9CA2AD44CE8DBBBC2DB\
         04DE8EF92E8EFC141FBECAA6287C59474E6BC05D99B2964FA090C3A2\
         233BA186515BE7ED1F612970CEE2D7AFB81BDD762170481CD0069127\
         D5B05AA993B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934063199\
         FFFFFFFFFFFFFFFF",
        "5",
    ),
    (
        /* 8192 */
        "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E08\
         8A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B\
         302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9\
         A637ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE6\
         49286651ECE45B3DC2007CB8A163BF0598DA48361C55D39A69163FA8\
         FD24CF5F83655D23DCA3AD961C62F356208552BB9ED529077096966D\
         670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C\
         180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
         3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D\
         04507A33A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7D\
         B3970F85A6E1E4C7ABF5AE8CDB0933D71E8C94E04A25619DCEE3D226\
         1AD2EE6BF12FFA06D98A0864D87602733EC86A64521F2B18177B200C\
         BBE117577A615D6C770988C0BAD946E208E24FA074E5AB3143DB5BFC\
         E0FD108E4B82D120A92108011A723C12A787E6D788719A10BDBA5B26\
         99C327186AF4E23C1A946834B6150BDA2583E9CA2AD44CE8DBBBC2DB\
         04DE8EF92E8EFC141FBECAA6287C59474E6BC05D99B2964FA090C3A2\
         233BA186515BE7ED1F612970CEE2D7AFB81BDD762170481CD0069127\
         D5B05AA993B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934028492\
         36C3FAB4D27C7026C1D4DCB2602646DEC9751E763DBA37BDF8FF9406\
         AD9E530EE5DB382F413001AEB06A53ED9027D831179727B0865A8918\
         DA3EDBEBCF9B14ED44CE6CBACED4BB1BDB7F1447E6CC254B33205151\
         2BD7AF426FB8F401378CD2BF5983CA01C64B92ECF032EA15D1721D03\
         F482D7CE6E74FEF6D55E702F46980C82B5A84031900B1C9E59E7C97F\
         BEC7E8F323A97A7E36CC88BE0F1D45B7FF585AC54BD407B22B4154AA\
         CC8F6D7EBF48E1D814CC5ED20F8037E0A79715EEF29BE32806A1D58B\
         B7C5DA76F550AA3D8A1FBFF0EB19CCB1A313D55CDA56C9EC2EF29632\
         387FE8D76E3C0468043E8F663F4860EE12BF2D5B0B7474D6E694F91E\
         6DBE115974A3926F12FEE5E438777CB6A932DF8CD8BEC4D073B931BA\
         3BC832B68D9DD300741FA7BF8AFC47ED2576F6936BA424663AAB639C\
         5AE4F5683423B4742BF1C978238F16CBE39D652DE3FDB8BEFC848AD9\
         22222E04A4037C0713EB57A81A23F0C73473FC646CEA306B4BCBC886\
         2F8385DDFA9D4B7FA2C087E879683303ED5BDD3A062B3CF5B3A278A6\
         6D2A13F83F44F82DDF310EE074AB6A364597E899A0255DC164F31CC5\
         0846851DF9AB48195DED7EA1B1D510BD7EE74D73FAF36BC31ECFA268\
         359046F4EB879F924009438B481C6CD7889A002ED5EE382BC9190DA6\
         FC026E479558E4475677E9AA9E3050E2765694DFC81F56E880B96E71\
         60C980DD98EDD3DFFFFFFFFFFFFFFFFF",
        "13",
    ),
];

#[derive(Debug, PartialEq)]
struct GroupParams {
    modulus: PrimeModulus,
    generator: Generator,
    modulus_length: usize,
}

/// An immutable (N, g) pair shared across sessions by a cheap handle.
///
/// All sessions derived from one [`Srp6Config`][`crate::Srp6Config`] point at
/// the same parameters; the last handle dropped releases them.
#[derive(Debug, Clone, PartialEq)]
pub struct Group(Arc<GroupParams>);

impl Group {
    /// one of the vetted RFC 5054 Appendix A groups
    pub fn standard(id: GroupId) -> Self {
        let (n_hex, g_hex) = STANDARD_GROUPS[match id {
            GroupId::N512 => 0,
            GroupId::N768 => 1,
            GroupId::N1024 => 2,
            GroupId::N2048 => 3,
            GroupId::N3072 => 4,
            GroupId::N4096 => 5,
            GroupId::N8192 => 6,
        }];
        let modulus =
            PrimeModulus::from_hex_str_be(n_hex).expect("RFC 5054 constants are valid hex");
        let generator =
            Generator::from_hex_str_be(g_hex).expect("RFC 5054 constants are valid hex");

        Self::from_parts(modulus, generator)
    }

    /// a caller-supplied (N, g) pair as big-endian hex strings.
    ///
    /// N must be at least 512 bits wide and g must satisfy `2 <= g < N`;
    /// the primality of N is the caller's responsibility.
    pub fn custom(n_hex: &str, g_hex: &str) -> Result<Self> {
        let modulus =
            PrimeModulus::from_hex_str_be(n_hex).map_err(|_| Srp6Error::InvalidCustomGroup)?;
        let generator =
            Generator::from_hex_str_be(g_hex).map_err(|_| Srp6Error::InvalidCustomGroup)?;

        if modulus.bits() < 512 {
            return Err(Srp6Error::InvalidCustomGroup);
        }
        if generator < Generator::from(2) || generator >= modulus {
            return Err(Srp6Error::InvalidCustomGroup);
        }

        Ok(Self::from_parts(modulus, generator))
    }

    fn from_parts(modulus: PrimeModulus, generator: Generator) -> Self {
        let modulus_length = modulus.num_bytes();
        Self(Arc::new(GroupParams {
            modulus,
            generator,
            modulus_length,
        }))
    }

    pub fn modulus(&self) -> &PrimeModulus {
        &self.0.modulus
    }

    pub fn generator(&self) -> &Generator {
        &self.0.generator
    }

    /// `byte_len(N)`, the fixed width of the strict padding mode
    pub fn modulus_length(&self) -> usize {
        self.0.modulus_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_groups_have_expected_widths() {
        for (id, bits, g) in [
            (GroupId::N512, 512, 2_u32),
            (GroupId::N768, 768, 2),
            (GroupId::N1024, 1024, 2),
            (GroupId::N2048, 2048, 2),
            (GroupId::N3072, 3072, 5),
            (GroupId::N4096, 4096, 5),
            // generator hex "13" is decimal 19
            (GroupId::N8192, 8192, 19),
        ] {
            let group = Group::standard(id);
            assert_eq!(group.modulus().bits(), bits, "{id:?} modulus width");
            assert_eq!(group.modulus_length(), bits as usize / 8);
            assert_eq!(group.generator(), &Generator::from(g), "{id:?} generator");
        }
    }

    #[test]
    fn handles_share_parameters() {
        let group = Group::standard(GroupId::N1024);
        let other = group.clone();
        assert_eq!(group, other);
        assert!(Arc::ptr_eq(&group.0, &other.0));
    }

    #[test]
    fn custom_group_accepts_the_rfc_prime() {
        let group = Group::custom(STANDARD_GROUPS[2].0, "2").unwrap();
        assert_eq!(group.modulus(), Group::standard(GroupId::N1024).modulus());
    }

    #[test]
    fn custom_group_rejects_bad_parameters() {
        // too narrow
        assert_eq!(
            Group::custom("EEAF0AB9", "2").unwrap_err(),
            Srp6Error::InvalidCustomGroup
        );
        // generator below 2
        assert_eq!(
            Group::custom(STANDARD_GROUPS[2].0, "1").unwrap_err(),
            Srp6Error::InvalidCustomGroup
        );
        // generator not below N
        assert_eq!(
            Group::custom(STANDARD_GROUPS[2].0, STANDARD_GROUPS[2].0).unwrap_err(),
            Srp6Error::InvalidCustomGroup
        );
        // not hex at all
        assert_eq!(
            Group::custom("not-hex", "2").unwrap_err(),
            Srp6Error::InvalidCustomGroup
        );
    }
}
