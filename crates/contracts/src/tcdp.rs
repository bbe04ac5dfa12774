//! Tokenized CDP and flash migrator interface definitions.

use alloy::sol;

sol! {
    /// Pooled CDP that mints share tokens against locked ether and rebalances between
    /// Compound and Aave.
    #[sol(rpc)]
    interface ITokenizedCdp {
        function collateral() external returns (uint256);
        function debt() external returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function isCompound() external view returns (bool);
        function getUnderlyingPrice() external view returns (uint256);

        function CompoundDaiAPR() external view returns (uint256);
        function CompoundEthAPR() external view returns (uint256);
        function AaveDaiAPR() external view returns (uint256);
        function AaveEthAPR() external view returns (uint256);

        function initiate(uint256 amount) external payable;
        function mint() external payable;
        function burn(uint256 amount) external;
        function leverage() external;
        function deleverage() external;
    }

    #[sol(rpc)]
    interface IFlashMigrator {
        function flashMigrate(address soloMargin) external;
    }
}
