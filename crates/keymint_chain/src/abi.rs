//! Contract ABI for the mint contract, generated with alloy's `sol!` macro.
//!
//! Only the functions the mint site calls are declared.

use alloy_sol_types::sol;

sol! {
    /// Public surface of the allowlisted NFT mint contract.
    #[sol(all_derives)]
    interface IKeymintNft {
        function totalSupply() external view returns (uint256 supply);
        function maxSupply() external view returns (uint256 supply);
        function isPaused() external view returns (bool paused);
        function mintState() external view returns (uint8 state);

        function cost() external view returns (uint256 price);
        function ogCost() external view returns (uint256 price);

        function ogLimit() external view returns (uint256 limit);
        function whitelistLimit() external view returns (uint256 limit);
        function publicLimit() external view returns (uint256 limit);

        function balanceOf(address owner) external view returns (uint256 balance);

        function presaleMint(uint256 amount, bytes32[] proof) external payable;
        function publicMint(uint256 amount) external payable;
    }
}
