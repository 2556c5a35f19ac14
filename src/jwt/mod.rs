pub mod builder;
pub mod claims;
pub mod issuer;
pub mod serializer;
pub mod signer;

pub use builder::JwtBuilder;
pub use claims::Claims;
pub use issuer::{IssuedToken, TokenIssuer};
pub use serializer::JwtSerializer;
pub use signer::JwtSigner;
