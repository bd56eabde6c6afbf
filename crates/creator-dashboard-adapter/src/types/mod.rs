/*
[INPUT]:  Creator backend JSON shapes
[OUTPUT]: Request bodies, reply envelopes and content/history models
[POS]:    Data layer - wire types shared by the HTTP modules
[UPDATE]: When the backend adds fields or endpoints
*/

pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use enums::*;
pub use models::*;
pub use requests::*;
pub use responses::*;
